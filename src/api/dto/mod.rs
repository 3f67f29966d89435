//! Wire representations of catalog records.
//!
//! Read-side structs (`*Representation`) fix the field allowlist of each
//! record and carry the derived read-only fields. Write-side structs
//! (`*Request`) list the only fields a client may set: anything else in the
//! payload, server-assigned fields included, is ignored by deserialization.
//!
//! All DTOs use Serde for JSON and validator for field-level checks.

pub mod category;
pub mod course;
pub mod enrollment;
pub mod health;

use std::borrow::Cow;

use serde::Serialize;
use validator::ValidationError;

use crate::error::FIELD_BLANK;

/// Response wrapper for collections.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

/// Rejects strings that are empty once surrounding whitespace is removed.
///
/// Used as a `custom` validator on fields that are trimmed before storage.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed(FIELD_BLANK)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Rust").is_ok());
        assert!(not_blank("  Rust  ").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank(" \t\n ").is_err());
    }
}
