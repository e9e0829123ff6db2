//! Caller-side name checks.
//!
//! [`TreeStore`](crate::tree::TreeStore) accepts any string, including an
//! empty one. Layers that take names from users run them through
//! [`validate_name`] first and store the trimmed result.

use snafu::{Snafu, ensure};

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum InvalidNameError {
    #[snafu(display("Name must not be blank"))]
    Blank,
}

/// Returns the trimmed name, rejecting names that are empty after trimming
pub fn validate_name(raw: &str) -> Result<String, InvalidNameError> {
    let trimmed = raw.trim();
    ensure!(!trimmed.is_empty(), BlankSnafu);
    Ok(trimmed.to_string())
}

pub fn is_valid_name(raw: &str) -> bool {
    validate_name(raw).is_ok()
}
