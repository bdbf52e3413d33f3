// Sanitizer settings

use crate::validation::{ConfigValidator, Validate};
use crate::{ConfigError, Result};
use scrubkit_xss::{AttributeMode, HtmlPolicy, ProtocolAllowList};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Upper bound accepted for `file.max_name_length`
pub const MAX_NAME_LENGTH_LIMIT: usize = 4096;

/// Every tunable constant of the sanitizers.
///
/// Missing sections and fields fall back to the built-in defaults, so an
/// empty file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    pub url: UrlSettings,
    pub html: HtmlSettings,
    pub file: FileSettings,
    pub email: EmailSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlSettings {
    pub allowed_protocols: ProtocolAllowList,
}

impl Default for UrlSettings {
    fn default() -> Self {
        Self {
            allowed_protocols: ProtocolAllowList::url_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlSettings {
    pub allowed_protocols: ProtocolAllowList,
    pub allowed_tags: HtmlPolicy,
    /// Filter attributes against `allowed_tags` instead of passing them through
    pub enforce_attributes: bool,
}

impl HtmlSettings {
    pub fn attribute_mode(&self) -> AttributeMode {
        if self.enforce_attributes {
            AttributeMode::Enforce
        } else {
            AttributeMode::Passthrough
        }
    }
}

impl Default for HtmlSettings {
    fn default() -> Self {
        Self {
            allowed_protocols: ProtocolAllowList::html_default(),
            allowed_tags: HtmlPolicy::basic(),
            enforce_attributes: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub max_name_length: usize,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            max_name_length: 255,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    pub min_length: usize,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self { min_length: 6 }
    }
}

impl SanitizerConfig {
    /// Build a config from a parsed document
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }

    /// Apply flat overrides keyed by lower-case name without prefix
    /// (`url_protocols`, `html_protocols`, `max_filename_length`,
    /// `enforce_attributes`). Unknown keys are ignored.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Result<()> {
        if let Some(value) = overrides.get("url_protocols") {
            self.url.allowed_protocols = ProtocolAllowList::new(split_list(value));
        }

        if let Some(value) = overrides.get("html_protocols") {
            self.html.allowed_protocols = ProtocolAllowList::new(split_list(value));
        }

        if let Some(value) = overrides.get("max_filename_length") {
            self.file.max_name_length = value.trim().parse().map_err(|_| {
                ConfigError::ParseError(format!("max_filename_length is not a number: {}", value))
            })?;
        }

        if let Some(value) = overrides.get("enforce_attributes") {
            self.html.enforce_attributes = parse_bool(value).ok_or_else(|| {
                ConfigError::ParseError(format!("enforce_attributes is not a boolean: {}", value))
            })?;
        }

        debug!(count = overrides.len(), "applied configuration overrides");
        Ok(())
    }
}

impl Validate for SanitizerConfig {
    fn validate(&self) -> Result<()> {
        validate_protocols(&self.url.allowed_protocols, "url.allowed_protocols")?;
        validate_protocols(&self.html.allowed_protocols, "html.allowed_protocols")?;

        for tag in self.html.allowed_tags.tags() {
            ConfigValidator::is_tag_name(tag, "html.allowed_tags")?;
        }

        ConfigValidator::in_range(
            self.file.max_name_length,
            1,
            MAX_NAME_LENGTH_LIMIT,
            "file.max_name_length",
        )?;
        ConfigValidator::in_range(self.email.min_length, 3, 320, "email.min_length")?;

        Ok(())
    }
}

fn validate_protocols(protocols: &ProtocolAllowList, field: &str) -> Result<()> {
    if protocols.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "{} cannot be empty",
            field
        )));
    }
    for scheme in protocols.protocols() {
        ConfigValidator::is_scheme(scheme, field)?;
    }
    Ok(())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SanitizerConfig::default();

        assert_eq!(config.url.allowed_protocols, ProtocolAllowList::url_default());
        assert_eq!(config.html.allowed_tags, HtmlPolicy::basic());
        assert_eq!(config.html.attribute_mode(), AttributeMode::Passthrough);
        assert_eq!(config.file.max_name_length, 255);
        assert_eq!(config.email.min_length, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let value = serde_json::json!({ "file": { "max_name_length": 64 } });
        let config = SanitizerConfig::from_value(value).unwrap();

        assert_eq!(config.file.max_name_length, 64);
        assert_eq!(config.url, UrlSettings::default());
        assert_eq!(config.html, HtmlSettings::default());
    }

    #[test]
    fn test_empty_tag_policy_is_valid() {
        let value = serde_json::json!({ "html": { "allowed_tags": {} } });
        let config = SanitizerConfig::from_value(value).unwrap();

        assert!(config.html.allowed_tags.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let mut config = SanitizerConfig::default();
        let overrides = HashMap::from([
            ("url_protocols".to_string(), "https, mailto".to_string()),
            ("max_filename_length".to_string(), "100".to_string()),
            ("enforce_attributes".to_string(), "yes".to_string()),
        ]);

        config.apply_overrides(&overrides).unwrap();

        assert_eq!(
            config.url.allowed_protocols,
            ProtocolAllowList::new(["https", "mailto"])
        );
        assert_eq!(config.file.max_name_length, 100);
        assert_eq!(config.html.attribute_mode(), AttributeMode::Enforce);
    }

    #[test]
    fn test_bad_override_values() {
        let mut config = SanitizerConfig::default();

        let overrides = HashMap::from([("max_filename_length".to_string(), "big".to_string())]);
        assert!(matches!(
            config.apply_overrides(&overrides),
            Err(ConfigError::ParseError(_))
        ));

        let overrides = HashMap::from([("enforce_attributes".to_string(), "maybe".to_string())]);
        assert!(matches!(
            config.apply_overrides(&overrides),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = SanitizerConfig::default();
        config.url.allowed_protocols = ProtocolAllowList::new(Vec::<String>::new());
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let mut config = SanitizerConfig::default();
        config.html.allowed_protocols = ProtocolAllowList::new(["http", "1bad"]);
        assert!(config.validate().is_err());

        let mut config = SanitizerConfig::default();
        config.html.allowed_tags = HtmlPolicy::new().allow_tag("<script>");
        assert!(config.validate().is_err());

        let mut config = SanitizerConfig::default();
        config.file.max_name_length = 0;
        assert!(config.validate().is_err());

        config.file.max_name_length = MAX_NAME_LENGTH_LIMIT + 1;
        assert!(config.validate().is_err());
    }
}
