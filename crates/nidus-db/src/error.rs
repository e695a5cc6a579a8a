//! Database-specific error types and conversions.

use nidus_core::error::NidusError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Row decode failed: {0}")]
    Decode(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for NidusError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => NidusError::NotFound { entity, id },
            other => NidusError::Database(other.to_string()),
        }
    }
}
