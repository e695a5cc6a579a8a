//! NIDUS Client — the application layer over the data-access crates.
//!
//! Provides environment configuration with a demo-mode fallback, profile
//! and session resolution, organization-scoped cached queries with
//! invalidation on mutation, upload validation against the blob-store
//! seam, and explicit workspace provisioning.

pub mod cache;
pub mod config;
pub mod service;
pub mod session;
pub mod upload;

pub use cache::QueryCache;
pub use config::{ClientConfig, StoreTarget};
pub use service::{ProvisionInput, Workspace, bootstrap_demo, provision_workspace};
pub use session::Sessions;
pub use upload::{BlobStore, MemoryBlobStore, UploadPolicy, UploadRequest};
