//! Repository for the `content_layouts` table.

use pagelayout_core::assignment::LayoutRecord;
use pagelayout_core::store::RevisionCommit;
use pagelayout_core::types::{DbId, ENTITY_TYPE_CONTENT};
use sqlx::PgPool;

use crate::models::content_layout::ContentLayoutRow;
use crate::repositories::json_text;

/// Column list for content_layouts queries.
const COLUMNS: &str =
    "id, content_item_id, revision_id, entity_type, active_template_id, layout, created_at";

/// Result of [`ContentLayoutRepo::commit_revision`].
#[derive(Debug)]
pub enum CommitResult {
    Committed(ContentLayoutRow),
    /// The item is no longer at the base revision.
    Stale { current_revision_id: DbId },
    ItemNotFound,
    /// The item points at a revision row that does not exist; nothing was
    /// written.
    BaseRevisionMissing { current_revision_id: DbId },
}

pub struct ContentLayoutRepo;

impl ContentLayoutRepo {
    /// Exact lookup by item and revision.
    pub async fn find(
        pool: &PgPool,
        content_item_id: DbId,
        revision_id: DbId,
    ) -> Result<Option<ContentLayoutRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_layouts
             WHERE content_item_id = $1 AND revision_id = $2 AND entity_type = $3"
        );
        sqlx::query_as::<_, ContentLayoutRow>(&query)
            .bind(content_item_id)
            .bind(revision_id)
            .bind(ENTITY_TYPE_CONTENT)
            .fetch_optional(pool)
            .await
    }

    /// Append a record. A second record for the same revision violates
    /// `uq_content_layouts_item_revision`.
    pub async fn insert(
        pool: &PgPool,
        record: &LayoutRecord,
    ) -> Result<ContentLayoutRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_layouts
                (content_item_id, revision_id, entity_type, active_template_id, layout)
             VALUES ($1, $2, $3, $4, CAST($5 AS JSON))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentLayoutRow>(&query)
            .bind(record.content_item_id)
            .bind(record.revision_id)
            .bind(&record.entity_type)
            .bind(&record.active_template_id)
            .bind(json_text(&record.assignments)?)
            .fetch_one(pool)
            .await
    }

    /// Create the next content revision and its layout record in one
    /// transaction, provided the item is still at the base revision.
    ///
    /// The item row is locked for the duration, so concurrent commits on the
    /// same item serialize and the loser sees `Stale`.
    pub async fn commit_revision(
        pool: &PgPool,
        commit: &RevisionCommit,
    ) -> Result<CommitResult, sqlx::Error> {
        let layout = json_text(&commit.assignments)?;
        let mut tx = pool.begin().await?;

        let current: Option<(DbId,)> = sqlx::query_as(
            "SELECT current_revision_id FROM content_items WHERE id = $1 FOR UPDATE",
        )
        .bind(commit.content_item_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((current_revision_id,)) = current else {
            return Ok(CommitResult::ItemNotFound);
        };
        if current_revision_id != commit.base_revision_id {
            return Ok(CommitResult::Stale {
                current_revision_id,
            });
        }
        let revision_id = current_revision_id + 1;

        let copied = sqlx::query(
            "INSERT INTO content_revisions
                (content_item_id, revision_id, title, fields, log_message,
                 created_by, translation_affected, created_at)
             SELECT content_item_id, $2, title, fields, $3, $4, $5, $6
             FROM content_revisions
             WHERE content_item_id = $1 AND revision_id = $7",
        )
        .bind(commit.content_item_id)
        .bind(revision_id)
        .bind(&commit.log_message)
        .bind(commit.created_by)
        .bind(commit.translation_affected)
        .bind(commit.created_at)
        .bind(current_revision_id)
        .execute(&mut *tx)
        .await?;
        if copied.rows_affected() != 1 {
            tracing::error!(
                content_item_id = commit.content_item_id,
                current_revision_id,
                "Current revision row missing, layout commit aborted"
            );
            return Ok(CommitResult::BaseRevisionMissing {
                current_revision_id,
            });
        }

        sqlx::query(
            "UPDATE content_items SET current_revision_id = $2, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(commit.content_item_id)
        .bind(revision_id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO content_layouts
                (content_item_id, revision_id, entity_type, active_template_id, layout)
             VALUES ($1, $2, $3, $4, CAST($5 AS JSON))
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ContentLayoutRow>(&query)
            .bind(commit.content_item_id)
            .bind(revision_id)
            .bind(ENTITY_TYPE_CONTENT)
            .bind(&commit.active_template_id)
            .bind(layout)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(CommitResult::Committed(row))
    }

    /// Number of layout records stored for an item.
    pub async fn count_by_item(pool: &PgPool, content_item_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM content_layouts WHERE content_item_id = $1")
                .bind(content_item_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
