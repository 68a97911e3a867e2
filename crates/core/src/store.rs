//! Region Assignment Store contract.
//!
//! The store owns [`LayoutRecord`]s: at most one per
//! `(content_item_id, revision_id)`, append-only, never updated in place.
//! Saving a layout also mints a new content revision, so the write path is a
//! single atomic [`LayoutStore::commit_revision`] that is conditional on the
//! revision the merge was computed against.

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::assignment::{LayoutRecord, RegionAssignment};
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Revision log message recorded for layout saves.
pub const LAYOUT_REVISION_LOG: &str = "Layout updated";

/// A new content revision together with the layout record bound to it.
#[derive(Debug, Clone)]
pub struct RevisionCommit {
    pub content_item_id: DbId,
    /// The revision the merge was based on. The commit only applies if this
    /// is still the item's current revision.
    pub base_revision_id: DbId,
    pub log_message: String,
    pub created_at: Timestamp,
    pub created_by: Option<DbId>,
    pub translation_affected: bool,
    /// Active template of the new record.
    pub active_template_id: String,
    pub assignments: IndexMap<String, RegionAssignment>,
}

/// Result of a conditional revision commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The revision and its layout record were written.
    Committed(LayoutRecord),
    /// Another writer moved the item past the base revision first.
    Stale { current_revision_id: DbId },
}

#[async_trait]
pub trait LayoutStore: Send + Sync {
    /// Exact lookup, no fallback.
    async fn find_exact(
        &self,
        content_item_id: DbId,
        revision_id: DbId,
    ) -> Result<Option<LayoutRecord>, CoreError>;

    /// Append a record. Fails with [`CoreError::Conflict`] if a record for the
    /// same item and revision already exists.
    async fn put(&self, record: &LayoutRecord) -> Result<(), CoreError>;

    /// Atomically create the next content revision and its layout record,
    /// provided the item is still at `commit.base_revision_id`.
    async fn commit_revision(&self, commit: &RevisionCommit) -> Result<CommitOutcome, CoreError>;
}

/// Load the layout record for a revision, falling back to the previous
/// revision exactly once.
///
/// The fallback covers an item that was just re-saved: the new revision id
/// exists before a layout record has been attached to it.
pub async fn load_record(
    store: &dyn LayoutStore,
    content_item_id: DbId,
    revision_id: DbId,
) -> Result<Option<LayoutRecord>, CoreError> {
    if let Some(record) = store.find_exact(content_item_id, revision_id).await? {
        return Ok(Some(record));
    }
    if revision_id <= 1 {
        return Ok(None);
    }
    let previous = store.find_exact(content_item_id, revision_id - 1).await?;
    if previous.is_some() {
        tracing::debug!(
            content_item_id,
            revision_id,
            "Using layout record of previous revision"
        );
    }
    Ok(previous)
}
