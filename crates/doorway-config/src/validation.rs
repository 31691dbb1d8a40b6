//! Field checks shared by the config sections

use crate::error::{ConfigError, Result};

/// Value checks serde cannot express. Errors name the field by its dotted
/// path, e.g. `router.timeout_ms`.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// `value` must be at least one
pub fn validate_positive(field: impl Into<String>, value: u64) -> Result<()> {
    if value == 0 {
        return Err(ConfigError::NotPositive {
            field: field.into(),
            value,
        });
    }
    Ok(())
}

/// A string setting must contain something besides whitespace
pub fn validate_not_blank(field: impl Into<String>, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid {
            field: field.into(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}
