/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Entity type stored alongside every layout record. Only content items carry
/// layouts today; the column exists so other entity types are not precluded.
pub const ENTITY_TYPE_CONTENT: &str = "content";
