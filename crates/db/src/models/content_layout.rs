//! Layout record model for the `content_layouts` table.

use indexmap::IndexMap;
use pagelayout_core::assignment::{LayoutRecord, RegionAssignment};
use pagelayout_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `content_layouts` table.
///
/// `layout` is a `JSON` column, so template, region and element order comes
/// back exactly as written.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContentLayoutRow {
    pub id: DbId,
    pub content_item_id: DbId,
    pub revision_id: DbId,
    pub entity_type: String,
    pub active_template_id: String,
    pub layout: Json<IndexMap<String, RegionAssignment>>,
    pub created_at: Timestamp,
}

impl From<ContentLayoutRow> for LayoutRecord {
    fn from(row: ContentLayoutRow) -> Self {
        Self {
            content_item_id: row.content_item_id,
            revision_id: row.revision_id,
            entity_type: row.entity_type,
            active_template_id: row.active_template_id,
            assignments: row.layout.0,
        }
    }
}
