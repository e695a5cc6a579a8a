//! Domain models for NIDUS.
//!
//! These are the core types shared across all crates. Every entity follows
//! the same convention: the persisted record, a `Create*` payload carrying
//! the caller-supplied fields, and an all-`Option` `Update*` payload where
//! only supplied fields are written.

pub mod cohort;
pub mod event;
pub mod investment;
pub mod material;
pub mod mentor;
pub mod organization;
pub mod profile;
pub mod startup;
