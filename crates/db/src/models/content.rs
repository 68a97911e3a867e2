//! Content type, content item and revision models.

use indexmap::IndexMap;
use pagelayout_core::content::{ContentItem, ContentType, DisplayComponent};
use pagelayout_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Content types
// ---------------------------------------------------------------------------

/// A row from the `content_types` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContentTypeRow {
    pub id: DbId,
    pub name: String,
    pub label: String,
    pub default_template_id: String,
    pub layout_editor_enabled: bool,
    pub allowed_templates: Vec<String>,
    pub display: Json<Vec<DisplayComponent>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ContentTypeRow> for ContentType {
    fn from(row: ContentTypeRow) -> Self {
        Self {
            name: row.name,
            label: row.label,
            default_template_id: row.default_template_id,
            layout_editor_enabled: row.layout_editor_enabled,
            allowed_templates: row.allowed_templates,
            display: row.display.0,
        }
    }
}

/// Input for creating a content type.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentType {
    pub name: String,
    pub label: String,
    pub default_template_id: String,
    #[serde(default)]
    pub layout_editor_enabled: bool,
    #[serde(default)]
    pub allowed_templates: Vec<String>,
    #[serde(default)]
    pub display: Vec<DisplayComponent>,
}

// ---------------------------------------------------------------------------
// Content items
// ---------------------------------------------------------------------------

/// An item joined with one of its revisions.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContentRevisionRow {
    pub content_item_id: DbId,
    pub content_type: String,
    pub revision_id: DbId,
    pub title: String,
    pub fields: Json<IndexMap<String, String>>,
    pub log_message: String,
    pub created_by: Option<DbId>,
    pub translation_affected: bool,
    pub created_at: Timestamp,
}

impl From<ContentRevisionRow> for ContentItem {
    fn from(row: ContentRevisionRow) -> Self {
        Self {
            id: row.content_item_id,
            content_type: row.content_type,
            title: row.title,
            revision_id: row.revision_id,
            fields: row.fields.0,
        }
    }
}

/// Input for creating a content item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentItem {
    pub content_type: String,
    pub title: String,
    #[serde(default)]
    pub fields: IndexMap<String, String>,
    pub created_by: Option<DbId>,
}

/// Input for an ordinary content save that mints a new revision.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContentItem {
    pub title: Option<String>,
    pub fields: Option<IndexMap<String, String>>,
    #[serde(default)]
    pub log_message: String,
    pub created_by: Option<DbId>,
}
