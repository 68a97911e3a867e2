//! PostgreSQL implementations of the core content and layout store traits.

use async_trait::async_trait;
use pagelayout_core::assignment::LayoutRecord;
use pagelayout_core::content::{BlockContent, ContentItem, ContentRepository, ContentType};
use pagelayout_core::error::CoreError;
use pagelayout_core::store::{CommitOutcome, LayoutStore, RevisionCommit};
use pagelayout_core::types::DbId;
use uuid::Uuid;

use crate::repositories::content_layout_repo::CommitResult;
use crate::repositories::{BlockContentRepo, ContentLayoutRepo, ContentRepo, ContentTypeRepo};
use crate::DbPool;

/// Name of the constraint enforcing one layout record per revision.
pub const LAYOUT_REVISION_CONSTRAINT: &str = "uq_content_layouts_item_revision";

/// Content and layout storage backed by a connection pool.
#[derive(Debug, Clone)]
pub struct PgBackend {
    pool: DbPool,
}

impl PgBackend {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn storage_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Database error");
    CoreError::Storage(err.to_string())
}

fn is_layout_revision_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(LAYOUT_REVISION_CONSTRAINT)
        }
        _ => false,
    }
}

#[async_trait]
impl ContentRepository for PgBackend {
    async fn find_item(&self, id: DbId) -> Result<Option<ContentItem>, CoreError> {
        let row = ContentRepo::find_current(&self.pool, id)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Into::into))
    }

    async fn find_revision(
        &self,
        id: DbId,
        revision_id: DbId,
    ) -> Result<Option<ContentItem>, CoreError> {
        let row = ContentRepo::find_revision(&self.pool, id, revision_id)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Into::into))
    }

    async fn find_content_type(&self, name: &str) -> Result<Option<ContentType>, CoreError> {
        let row = ContentTypeRepo::find_by_name(&self.pool, name)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Into::into))
    }

    async fn find_block_content(&self, uuid: Uuid) -> Result<Option<BlockContent>, CoreError> {
        let row = BlockContentRepo::find_by_uuid(&self.pool, uuid)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Into::into))
    }

    async fn list_block_content(&self) -> Result<Vec<BlockContent>, CoreError> {
        let rows = BlockContentRepo::list(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl LayoutStore for PgBackend {
    async fn find_exact(
        &self,
        content_item_id: DbId,
        revision_id: DbId,
    ) -> Result<Option<LayoutRecord>, CoreError> {
        let row = ContentLayoutRepo::find(&self.pool, content_item_id, revision_id)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Into::into))
    }

    async fn put(&self, record: &LayoutRecord) -> Result<(), CoreError> {
        match ContentLayoutRepo::insert(&self.pool, record).await {
            Ok(_) => Ok(()),
            Err(err) if is_layout_revision_violation(&err) => Err(CoreError::Conflict(format!(
                "Layout record already exists for content item {} revision {}",
                record.content_item_id, record.revision_id
            ))),
            Err(err) => Err(storage_error(err)),
        }
    }

    async fn commit_revision(&self, commit: &RevisionCommit) -> Result<CommitOutcome, CoreError> {
        let result = ContentLayoutRepo::commit_revision(&self.pool, commit)
            .await
            .map_err(storage_error)?;
        match result {
            CommitResult::Committed(row) => Ok(CommitOutcome::Committed(row.into())),
            CommitResult::Stale {
                current_revision_id,
            } => Ok(CommitOutcome::Stale {
                current_revision_id,
            }),
            CommitResult::ItemNotFound => Err(CoreError::NotFound {
                entity: "ContentItem",
                id: commit.content_item_id,
            }),
            CommitResult::BaseRevisionMissing {
                current_revision_id,
            } => Err(CoreError::Internal(format!(
                "Content item {} has no revision {current_revision_id}",
                commit.content_item_id
            ))),
        }
    }
}
