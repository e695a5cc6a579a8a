//! Error types for the NIDUS system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NidusError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Upload rejected: {0}")]
    Upload(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Organization context missing or invalid")]
    OrganizationContext,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type NidusResult<T> = Result<T, NidusError>;
