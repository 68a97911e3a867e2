//! In-memory content and layout storage.
//!
//! Implements both [`ContentRepository`] and [`LayoutStore`] over a single
//! lock so a revision commit is atomic with respect to readers. Used by the
//! test suites and by the API when it runs without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::assignment::LayoutRecord;
use crate::content::{BlockContent, ContentItem, ContentRepository, ContentType};
use crate::error::CoreError;
use crate::store::{CommitOutcome, LayoutStore, RevisionCommit};
use crate::types::{DbId, Timestamp};

/// A stored content revision.
#[derive(Debug, Clone)]
struct StoredRevision {
    title: String,
    fields: IndexMap<String, String>,
    log_message: String,
    created_at: Timestamp,
    created_by: Option<DbId>,
    translation_affected: bool,
}

#[derive(Debug, Clone)]
struct StoredItem {
    content_type: String,
    current_revision_id: DbId,
    /// Revisions keyed by revision id, oldest first.
    revisions: IndexMap<DbId, StoredRevision>,
}

impl StoredItem {
    fn as_of(&self, id: DbId, revision_id: DbId) -> Option<ContentItem> {
        let revision = self.revisions.get(&revision_id)?;
        Some(ContentItem {
            id,
            content_type: self.content_type.clone(),
            title: revision.title.clone(),
            revision_id,
            fields: revision.fields.clone(),
        })
    }
}

#[derive(Debug, Default)]
struct State {
    next_item_id: DbId,
    content_types: HashMap<String, ContentType>,
    items: HashMap<DbId, StoredItem>,
    blocks: IndexMap<Uuid, BlockContent>,
    layouts: HashMap<(DbId, DbId), LayoutRecord>,
}

/// Revision metadata as recorded by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionInfo {
    pub revision_id: DbId,
    pub log_message: String,
    pub created_by: Option<DbId>,
    pub translation_affected: bool,
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: RwLock<State>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_content_type(&self, content_type: ContentType) {
        self.state
            .write()
            .await
            .content_types
            .insert(content_type.name.clone(), content_type);
    }

    /// Create a content item at revision 1.
    pub async fn create_item(
        &self,
        content_type: &str,
        title: &str,
        fields: IndexMap<String, String>,
    ) -> Result<ContentItem, CoreError> {
        let mut state = self.state.write().await;
        if !state.content_types.contains_key(content_type) {
            return Err(CoreError::UnknownKey {
                entity: "ContentType",
                key: content_type.to_string(),
            });
        }
        state.next_item_id += 1;
        let id = state.next_item_id;
        let stored = StoredItem {
            content_type: content_type.to_string(),
            current_revision_id: 1,
            revisions: IndexMap::from([(
                1,
                StoredRevision {
                    title: title.to_string(),
                    fields,
                    log_message: String::new(),
                    created_at: chrono::Utc::now(),
                    created_by: None,
                    translation_affected: false,
                },
            )]),
        };
        let item = stored.as_of(id, 1);
        state.items.insert(id, stored);
        item.ok_or_else(|| CoreError::Internal("Created item has no revision".into()))
    }

    /// Save a new revision with updated field values and no layout data, the
    /// way an ordinary content edit does.
    pub async fn save_revision(
        &self,
        id: DbId,
        fields: IndexMap<String, String>,
    ) -> Result<ContentItem, CoreError> {
        let mut state = self.state.write().await;
        let stored = state.items.get_mut(&id).ok_or(CoreError::NotFound {
            entity: "ContentItem",
            id,
        })?;
        let previous = stored
            .revisions
            .get(&stored.current_revision_id)
            .cloned()
            .ok_or_else(|| CoreError::Internal(format!("Item {id} has no current revision")))?;
        let revision_id = stored.current_revision_id + 1;
        stored.revisions.insert(
            revision_id,
            StoredRevision {
                fields,
                log_message: String::new(),
                created_at: chrono::Utc::now(),
                created_by: None,
                translation_affected: false,
                ..previous
            },
        );
        stored.current_revision_id = revision_id;
        stored
            .as_of(id, revision_id)
            .ok_or_else(|| CoreError::Internal("Saved revision missing".into()))
    }

    pub async fn add_block_content(&self, block: BlockContent) {
        self.state.write().await.blocks.insert(block.uuid, block);
    }

    pub async fn layout_record_count(&self) -> usize {
        self.state.read().await.layouts.len()
    }

    pub async fn revision_info(&self, id: DbId, revision_id: DbId) -> Option<RevisionInfo> {
        let state = self.state.read().await;
        let revision = state.items.get(&id)?.revisions.get(&revision_id)?;
        Some(RevisionInfo {
            revision_id,
            log_message: revision.log_message.clone(),
            created_by: revision.created_by,
            translation_affected: revision.translation_affected,
        })
    }
}

#[async_trait]
impl ContentRepository for MemoryBackend {
    async fn find_item(&self, id: DbId) -> Result<Option<ContentItem>, CoreError> {
        let state = self.state.read().await;
        Ok(state
            .items
            .get(&id)
            .and_then(|stored| stored.as_of(id, stored.current_revision_id)))
    }

    async fn find_revision(
        &self,
        id: DbId,
        revision_id: DbId,
    ) -> Result<Option<ContentItem>, CoreError> {
        let state = self.state.read().await;
        Ok(state
            .items
            .get(&id)
            .and_then(|stored| stored.as_of(id, revision_id)))
    }

    async fn find_content_type(&self, name: &str) -> Result<Option<ContentType>, CoreError> {
        Ok(self.state.read().await.content_types.get(name).cloned())
    }

    async fn find_block_content(&self, uuid: Uuid) -> Result<Option<BlockContent>, CoreError> {
        Ok(self.state.read().await.blocks.get(&uuid).cloned())
    }

    async fn list_block_content(&self) -> Result<Vec<BlockContent>, CoreError> {
        let mut blocks: Vec<_> = self.state.read().await.blocks.values().cloned().collect();
        blocks.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(blocks)
    }
}

#[async_trait]
impl LayoutStore for MemoryBackend {
    async fn find_exact(
        &self,
        content_item_id: DbId,
        revision_id: DbId,
    ) -> Result<Option<LayoutRecord>, CoreError> {
        Ok(self
            .state
            .read()
            .await
            .layouts
            .get(&(content_item_id, revision_id))
            .cloned())
    }

    async fn put(&self, record: &LayoutRecord) -> Result<(), CoreError> {
        let mut state = self.state.write().await;
        let key = (record.content_item_id, record.revision_id);
        if state.layouts.contains_key(&key) {
            return Err(CoreError::Conflict(format!(
                "Layout record already exists for content item {} revision {}",
                record.content_item_id, record.revision_id
            )));
        }
        state.layouts.insert(key, record.clone());
        Ok(())
    }

    async fn commit_revision(&self, commit: &RevisionCommit) -> Result<CommitOutcome, CoreError> {
        let mut state = self.state.write().await;
        let id = commit.content_item_id;
        let stored = state.items.get_mut(&id).ok_or(CoreError::NotFound {
            entity: "ContentItem",
            id,
        })?;
        if stored.current_revision_id != commit.base_revision_id {
            return Ok(CommitOutcome::Stale {
                current_revision_id: stored.current_revision_id,
            });
        }

        let base = stored
            .revisions
            .get(&commit.base_revision_id)
            .cloned()
            .ok_or_else(|| CoreError::Internal(format!("Item {id} has no base revision")))?;
        let revision_id = stored.current_revision_id + 1;
        stored.revisions.insert(
            revision_id,
            StoredRevision {
                log_message: commit.log_message.clone(),
                created_at: commit.created_at,
                created_by: commit.created_by,
                translation_affected: commit.translation_affected,
                ..base
            },
        );
        stored.current_revision_id = revision_id;

        let record = LayoutRecord::new(
            id,
            revision_id,
            commit.active_template_id.clone(),
            commit.assignments.clone(),
        );
        state.layouts.insert((id, revision_id), record.clone());
        Ok(CommitOutcome::Committed(record))
    }
}
