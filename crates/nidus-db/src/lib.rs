//! NIDUS Database — SurrealDB connection management, schema migrations,
//! and repository implementations.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`], [`open_memory`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - The generic repository implementation ([`SurrealStore`])
//! - Error types ([`DbError`])

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager, open_memory};
pub use error::DbError;
pub use repository::SurrealStore;
pub use schema::{run_migrations, schema_v1};
