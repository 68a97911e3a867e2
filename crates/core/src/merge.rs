//! Layout Merge/Save Engine.
//!
//! A save fully replaces the configuration of each submitted template and
//! leaves every other stored template untouched. Submitted templates are
//! placed first and the first one becomes active. Each save mints a new
//! content revision and binds a new layout record to it.
//!
//! The read of the existing record and the write of the new one are tied
//! together by a conditional commit: if another save moved the item on in
//! between, the merge is recomputed against the fresh state.

use indexmap::IndexMap;

use crate::assignment::{LayoutRecord, LayoutSubmission, RegionAssignment};
use crate::context::RequestContext;
use crate::engine::LayoutEngine;
use crate::error::CoreError;
use crate::store::{load_record, CommitOutcome, RevisionCommit, LAYOUT_REVISION_LOG};
use crate::types::DbId;

/// How many times a save is attempted before giving up on a busy item.
pub const SAVE_ATTEMPTS: usize = 3;

/// Result of a save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new revision and layout record were written.
    Saved {
        content_item_id: DbId,
        revision_id: DbId,
        active_template_id: String,
    },
    /// The submission was empty; nothing was written.
    Unchanged { content_item_id: DbId },
}

impl SaveOutcome {
    pub fn content_item_id(&self) -> DbId {
        match self {
            Self::Saved {
                content_item_id, ..
            }
            | Self::Unchanged { content_item_id } => *content_item_id,
        }
    }
}

/// Merge a submission over an existing record's assignments.
///
/// Returns the new active template id and the merged assignment map:
/// submitted templates first (in submission order), then every stored
/// template that was not resubmitted, in stored order. An empty submission
/// keeps the existing active template.
pub fn merge_assignments(
    existing: Option<&LayoutRecord>,
    submission: &LayoutSubmission,
) -> (Option<String>, IndexMap<String, RegionAssignment>) {
    let mut merged: IndexMap<String, RegionAssignment> = submission.templates.clone();
    if let Some(existing) = existing {
        for (template_id, regions) in &existing.assignments {
            if !merged.contains_key(template_id) {
                merged.insert(template_id.clone(), regions.clone());
            }
        }
    }
    let active = submission
        .primary_template()
        .map(str::to_string)
        .or_else(|| existing.map(|r| r.active_template_id.clone()));
    (active, merged)
}

impl LayoutEngine {
    /// Save a layout submission for a content item.
    ///
    /// An empty submission is a successful no-op: nothing is written and no
    /// revision is created.
    pub async fn save(
        &self,
        ctx: &RequestContext,
        content_item_id: DbId,
        submission: &LayoutSubmission,
    ) -> Result<SaveOutcome, CoreError> {
        let mut item = self.load_current(content_item_id).await?;

        if submission.is_empty() {
            tracing::warn!(content_item_id, "Layout save without layout data, nothing to merge");
            return Ok(SaveOutcome::Unchanged { content_item_id });
        }

        for attempt in 1..=SAVE_ATTEMPTS {
            let existing = load_record(self.store.as_ref(), item.id, item.revision_id).await?;
            let (active, assignments) = merge_assignments(existing.as_ref(), submission);
            let Some(active_template_id) = active else {
                return Ok(SaveOutcome::Unchanged { content_item_id });
            };

            let commit = RevisionCommit {
                content_item_id: item.id,
                base_revision_id: item.revision_id,
                log_message: LAYOUT_REVISION_LOG.to_string(),
                created_at: chrono::Utc::now(),
                created_by: ctx.viewer.user_id,
                translation_affected: true,
                active_template_id,
                assignments,
            };

            match self.store.commit_revision(&commit).await? {
                CommitOutcome::Committed(record) => {
                    tracing::info!(
                        content_item_id,
                        revision_id = record.revision_id,
                        template_id = %record.active_template_id,
                        templates = record.assignments.len(),
                        "Layout saved"
                    );
                    return Ok(SaveOutcome::Saved {
                        content_item_id,
                        revision_id: record.revision_id,
                        active_template_id: record.active_template_id,
                    });
                }
                CommitOutcome::Stale {
                    current_revision_id,
                } => {
                    tracing::warn!(
                        content_item_id,
                        attempt,
                        base_revision_id = item.revision_id,
                        current_revision_id,
                        "Layout save raced with another revision, retrying"
                    );
                    item = self.load_current(content_item_id).await?;
                }
            }
        }

        Err(CoreError::Conflict(format!(
            "Content item {content_item_id} changed during layout save; gave up after {SAVE_ATTEMPTS} attempts"
        )))
    }

    /// Attach the latest layout record to the item's current revision after
    /// an ordinary content save that carried no layout data.
    ///
    /// Returns the new record, or `None` when the current revision already
    /// has one or there is nothing to carry forward.
    pub async fn carry_forward(
        &self,
        content_item_id: DbId,
    ) -> Result<Option<LayoutRecord>, CoreError> {
        let item = self.load_current(content_item_id).await?;
        let Some(record) = load_record(self.store.as_ref(), item.id, item.revision_id).await?
        else {
            return Ok(None);
        };
        if record.revision_id == item.revision_id {
            return Ok(None);
        }

        let carried = record.rebind(item.revision_id);
        match self.store.put(&carried).await {
            Ok(()) => {
                tracing::info!(
                    content_item_id,
                    from_revision = record.revision_id,
                    to_revision = item.revision_id,
                    "Layout carried forward"
                );
                Ok(Some(carried))
            }
            // Someone else attached a record first.
            Err(CoreError::Conflict(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
