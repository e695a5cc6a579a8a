//! Client-side payload validation.
//!
//! Create/update payloads are validated before any query is issued, so a
//! rejected form submission never produces store traffic. The store's own
//! `ASSERT` constraints remain the last line of defense.

use crate::error::{NidusError, NidusResult};

pub trait Validate {
    fn validate(&self) -> NidusResult<()>;
}

pub(crate) fn invalid(message: impl Into<String>) -> NidusError {
    NidusError::Validation {
        message: message.into(),
    }
}

pub(crate) fn require_nonempty(field: &str, value: &str) -> NidusResult<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{field} must not be empty")));
    }
    Ok(())
}
