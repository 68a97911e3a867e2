//! Content items, content types and the content collaborator contract.
//!
//! Content storage belongs to the host system. The engines only need to read
//! items (current or a specific revision), their content type settings, and
//! reusable content blocks, which is what [`ContentRepository`] exposes.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::DbId;

/// How a field label is shown by the default display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelDisplay {
    Above,
    Inline,
    #[default]
    Hidden,
}

/// One field's entry in a content type's default display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayComponent {
    pub field: String,
    pub label: String,
    #[serde(default)]
    pub label_display: LabelDisplay,
}

/// Per-content-type settings relevant to layouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
    /// Machine name, e.g. `article`.
    pub name: String,
    pub label: String,
    /// Template used when no per-item layout applies.
    pub default_template_id: String,
    /// Whether the layout editor is enabled for this type.
    pub layout_editor_enabled: bool,
    /// Administratively allowed templates; empty allows all.
    pub allowed_templates: Vec<String>,
    /// The default display: which fields render, in which order.
    pub display: Vec<DisplayComponent>,
}

impl ContentType {
    pub fn allows_template(&self, template_id: &str) -> bool {
        self.allowed_templates.is_empty() || self.allowed_templates.iter().any(|t| t == template_id)
    }

    pub fn display_component(&self, field: &str) -> Option<&DisplayComponent> {
        self.display.iter().find(|c| c.field == field)
    }

    /// The permission a user needs to edit layouts of this type.
    pub fn layout_permission(&self) -> String {
        layout_permission(&self.name)
    }
}

/// Permission name for editing layouts of `content_type`.
pub fn layout_permission(content_type: &str) -> String {
    format!("use {content_type} layout per node")
}

/// A content item as of one revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: DbId,
    pub content_type: String,
    pub title: String,
    /// The revision these field values belong to.
    pub revision_id: DbId,
    /// Plain field values keyed by field machine name.
    pub fields: IndexMap<String, String>,
}

/// A reusable content block, addressed across environments by UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContent {
    pub uuid: Uuid,
    pub label: String,
    pub body: String,
}

/// Read access to host content.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Load an item at its current revision.
    async fn find_item(&self, id: DbId) -> Result<Option<ContentItem>, CoreError>;

    /// Load an item as of a specific revision.
    async fn find_revision(
        &self,
        id: DbId,
        revision_id: DbId,
    ) -> Result<Option<ContentItem>, CoreError>;

    async fn find_content_type(&self, name: &str) -> Result<Option<ContentType>, CoreError>;

    async fn find_block_content(&self, uuid: Uuid) -> Result<Option<BlockContent>, CoreError>;

    /// Every reusable content block, ordered by label.
    async fn list_block_content(&self) -> Result<Vec<BlockContent>, CoreError>;
}

/// Load the content type of `item`, treating a dangling type as an internal
/// inconsistency.
pub async fn content_type_of(
    content: &dyn ContentRepository,
    item: &ContentItem,
) -> Result<ContentType, CoreError> {
    content
        .find_content_type(&item.content_type)
        .await?
        .ok_or_else(|| {
            CoreError::Internal(format!(
                "Content item {} references unknown content type '{}'",
                item.id, item.content_type
            ))
        })
}
