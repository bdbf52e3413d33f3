// Configuration validation

use crate::{ConfigError, Result};
use std::fmt::Display;

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Configuration validator with rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a value is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    /// Validate that a number is within range
    pub fn in_range<T: PartialOrd + Display>(value: T, min: T, max: T, field: &str) -> Result<()> {
        if value < min || value > max {
            return Err(ConfigError::ValidationError(format!(
                "{} must be between {} and {}, got {}",
                field, min, max, value
            )));
        }
        Ok(())
    }

    /// Validate a URL scheme name: a letter, then letters, digits, `+`, `-` or `.`
    pub fn is_scheme(value: &str, field: &str) -> Result<()> {
        Self::not_empty(value, field)?;

        let mut chars = value.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

        if !valid {
            return Err(ConfigError::ValidationError(format!(
                "{} contains an invalid scheme: {:?}",
                field, value
            )));
        }
        Ok(())
    }

    /// Validate an HTML tag name: lower-case, no markup characters or whitespace
    pub fn is_tag_name(value: &str, field: &str) -> Result<()> {
        Self::not_empty(value, field)?;

        let valid = value
            .chars()
            .all(|c| !c.is_ascii_uppercase() && !c.is_whitespace() && !matches!(c, '<' | '>' | '/'));

        if !valid {
            return Err(ConfigError::ValidationError(format!(
                "{} contains an invalid tag name: {:?}",
                field, value
            )));
        }
        Ok(())
    }
}
