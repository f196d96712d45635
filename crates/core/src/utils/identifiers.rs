//! Validation for tenant and sub-account identifiers.

use crate::constants::MAX_IDENTIFIER_LEN;
use crate::errors::{Error, Result};

/// Validates a tenant identifier and returns it trimmed.
pub fn validate_tenant_id(value: &str) -> Result<&str> {
    validate_identifier("tenant", value)
}

/// Validates a sub-account identifier and returns it trimmed.
pub fn validate_sub_account_id(value: &str) -> Result<&str> {
    validate_identifier("sub-account", value)
}

fn validate_identifier<'a>(kind: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument(format!("{} id is missing", kind)));
    }
    if trimmed.len() > MAX_IDENTIFIER_LEN {
        return Err(Error::InvalidArgument(format!(
            "{} id exceeds {} characters",
            kind, MAX_IDENTIFIER_LEN
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::InvalidArgument(format!(
            "{} id '{}' contains invalid characters",
            kind, trimmed
        )));
    }
    Ok(trimmed)
}
