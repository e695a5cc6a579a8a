//! NIDUS Core — domain models, role-based dashboard routing, and
//! repository trait definitions shared across all crates.

pub mod dashboard;
pub mod error;
pub mod models;
pub mod repository;
pub mod validate;

pub use error::{NidusError, NidusResult};
