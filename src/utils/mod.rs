//! Utility functions shared across layers.
//!
//! - [`db_error`] - Database error classification
//! - [`url_normalizer`] - Thumbnail URL validation and normalization

pub mod db_error;
pub mod url_normalizer;
