pub mod block_content_repo;
pub mod content_layout_repo;
pub mod content_repo;
pub mod content_type_repo;

pub use block_content_repo::BlockContentRepo;
pub use content_layout_repo::ContentLayoutRepo;
pub use content_repo::ContentRepo;
pub use content_type_repo::ContentTypeRepo;

/// Serialize a value for a `JSON` column.
///
/// Bound as text and cast in SQL: binding `sqlx::types::Json` sends JSONB,
/// which would reorder object keys.
pub(crate) fn json_text<T: serde::Serialize>(value: &T) -> Result<String, sqlx::Error> {
    serde_json::to_string(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
