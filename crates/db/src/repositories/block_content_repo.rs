//! Repository for the `block_contents` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::block_content::{BlockContentRow, CreateBlockContent};

/// Column list for block_contents queries.
const COLUMNS: &str = "id, uuid, label, body, created_at, updated_at";

pub struct BlockContentRepo;

impl BlockContentRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateBlockContent,
    ) -> Result<BlockContentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO block_contents (uuid, label, body)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlockContentRow>(&query)
            .bind(input.uuid.unwrap_or_else(Uuid::new_v4))
            .bind(&input.label)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// Find a block by its cross-environment UUID.
    pub async fn find_by_uuid(
        pool: &PgPool,
        uuid: Uuid,
    ) -> Result<Option<BlockContentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM block_contents WHERE uuid = $1");
        sqlx::query_as::<_, BlockContentRow>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<BlockContentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM block_contents ORDER BY label, id");
        sqlx::query_as::<_, BlockContentRow>(&query)
            .fetch_all(pool)
            .await
    }
}
