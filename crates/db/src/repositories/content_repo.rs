//! Repository for `content_items` and their `content_revisions`.

use pagelayout_core::types::DbId;
use sqlx::PgPool;

use crate::models::content::{ContentRevisionRow, CreateContentItem, UpdateContentItem};
use crate::repositories::json_text;

/// Column list for an item joined with one revision (`i` = item, `r` = revision).
const COLUMNS: &str = "r.content_item_id, i.content_type, r.revision_id, r.title, r.fields, \
    r.log_message, r.created_by, r.translation_affected, r.created_at";

pub struct ContentRepo;

impl ContentRepo {
    /// Create an item together with its first revision.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContentItem,
    ) -> Result<ContentRevisionRow, sqlx::Error> {
        let fields = json_text(&input.fields)?;
        let mut tx = pool.begin().await?;

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO content_items (content_type, current_revision_id)
             VALUES ($1, 1)
             RETURNING id",
        )
        .bind(&input.content_type)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO content_revisions
                (content_item_id, revision_id, title, fields, created_by)
             VALUES ($1, 1, $2, CAST($3 AS JSON), $4)",
        )
        .bind(id)
        .bind(&input.title)
        .bind(fields)
        .bind(input.created_by)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM content_items i
             JOIN content_revisions r ON r.content_item_id = i.id
             WHERE i.id = $1 AND r.revision_id = 1"
        );
        let row = sqlx::query_as::<_, ContentRevisionRow>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Find an item at its current revision.
    pub async fn find_current(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContentRevisionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_items i
             JOIN content_revisions r
               ON r.content_item_id = i.id AND r.revision_id = i.current_revision_id
             WHERE i.id = $1"
        );
        sqlx::query_as::<_, ContentRevisionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an item as of a specific revision.
    pub async fn find_revision(
        pool: &PgPool,
        id: DbId,
        revision_id: DbId,
    ) -> Result<Option<ContentRevisionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_items i
             JOIN content_revisions r ON r.content_item_id = i.id
             WHERE i.id = $1 AND r.revision_id = $2"
        );
        sqlx::query_as::<_, ContentRevisionRow>(&query)
            .bind(id)
            .bind(revision_id)
            .fetch_optional(pool)
            .await
    }

    /// Save a new revision without layout data. Unset inputs are copied from
    /// the current revision. Returns `None` if the item does not exist.
    pub async fn save_revision(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContentItem,
    ) -> Result<Option<ContentRevisionRow>, sqlx::Error> {
        let fields = input.fields.as_ref().map(json_text).transpose()?;
        let mut tx = pool.begin().await?;

        let current: Option<(DbId,)> = sqlx::query_as(
            "SELECT current_revision_id FROM content_items WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((current_revision_id,)) = current else {
            return Ok(None);
        };
        let revision_id = current_revision_id + 1;

        let copied = sqlx::query(
            "INSERT INTO content_revisions
                (content_item_id, revision_id, title, fields, log_message, created_by)
             SELECT content_item_id, $2, COALESCE($3, title),
                    COALESCE(CAST($4 AS JSON), fields), $5, $6
             FROM content_revisions
             WHERE content_item_id = $1 AND revision_id = $7",
        )
        .bind(id)
        .bind(revision_id)
        .bind(&input.title)
        .bind(fields)
        .bind(&input.log_message)
        .bind(input.created_by)
        .bind(current_revision_id)
        .execute(&mut *tx)
        .await?;
        // No row to copy from: leave the item where it is.
        if copied.rows_affected() != 1 {
            return Err(sqlx::Error::RowNotFound);
        }

        sqlx::query(
            "UPDATE content_items SET current_revision_id = $2, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(revision_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Self::find_revision(pool, id, revision_id).await
    }
}
