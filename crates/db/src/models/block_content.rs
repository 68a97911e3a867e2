//! Reusable content block model.

use pagelayout_core::content::BlockContent;
use pagelayout_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `block_contents` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BlockContentRow {
    pub id: DbId,
    pub uuid: Uuid,
    pub label: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<BlockContentRow> for BlockContent {
    fn from(row: BlockContentRow) -> Self {
        Self {
            uuid: row.uuid,
            label: row.label,
            body: row.body,
        }
    }
}

/// Input for creating a content block. A UUID is generated when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlockContent {
    pub uuid: Option<Uuid>,
    pub label: String,
    #[serde(default)]
    pub body: String,
}
