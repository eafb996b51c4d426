//! Input guards for caller-supplied strings.

use crate::error::{Result, ValidationError};

/// Require a non-empty value for the named field.
///
/// Role names, hostnames, and accessors are otherwise opaque; emptiness is
/// the only property checked before they reach the backend.
pub fn require_nonempty(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::Empty(field).into());
    }
    Ok(())
}
