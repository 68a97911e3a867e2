//! Repository for the `content_types` table.

use sqlx::PgPool;

use crate::models::content::{ContentTypeRow, CreateContentType};
use crate::repositories::json_text;

/// Column list for content_types queries.
const COLUMNS: &str = "id, name, label, default_template_id, layout_editor_enabled, \
    allowed_templates, display, created_at, updated_at";

pub struct ContentTypeRepo;

impl ContentTypeRepo {
    /// Insert a new content type, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContentType,
    ) -> Result<ContentTypeRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_types
                (name, label, default_template_id, layout_editor_enabled,
                 allowed_templates, display)
             VALUES ($1, $2, $3, $4, $5, CAST($6 AS JSON))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentTypeRow>(&query)
            .bind(&input.name)
            .bind(&input.label)
            .bind(&input.default_template_id)
            .bind(input.layout_editor_enabled)
            .bind(&input.allowed_templates)
            .bind(json_text(&input.display)?)
            .fetch_one(pool)
            .await
    }

    /// Find a content type by machine name.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<ContentTypeRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_types WHERE name = $1");
        sqlx::query_as::<_, ContentTypeRow>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all content types ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<ContentTypeRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_types ORDER BY name");
        sqlx::query_as::<_, ContentTypeRow>(&query)
            .fetch_all(pool)
            .await
    }
}
