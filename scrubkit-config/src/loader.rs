// Configuration file loaders

use crate::env::EnvLoader;
use crate::settings::SanitizerConfig;
use crate::{ConfigError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Json,
    Toml,
    Env,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "env" => Some(FileFormat::Env),
            _ => None,
        }
    }
}

/// Configuration file loader
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension. A bare `.env` file counts as env.
    pub fn auto(path: &str) -> Result<Self> {
        let path_obj = Path::new(path);
        if path_obj.file_name().and_then(|s| s.to_str()) == Some(".env") {
            return Ok(Self::new(FileFormat::Env));
        }

        let ext = path_obj
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))?;

        Ok(Self::new(format))
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Load configuration from file
    pub fn load_file(&self, path: &str) -> Result<Value> {
        let content = fs::read_to_string(path)?;
        self.parse(&content)
    }

    /// Read a file straight into sanitizer settings.
    ///
    /// JSON and TOML files mirror [`SanitizerConfig`]; env files hold
    /// `SCRUBKIT_*` overrides applied on top of the defaults.
    pub fn load_config(&self, path: &str) -> Result<SanitizerConfig> {
        let content = fs::read_to_string(path)?;
        self.parse_config(&content)
    }

    pub fn parse_config(&self, content: &str) -> Result<SanitizerConfig> {
        let value = self.parse(content)?;

        match self.format {
            FileFormat::Env => {
                let pairs = match value {
                    Value::Object(map) => map
                        .into_iter()
                        .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
                        .collect::<Vec<_>>(),
                    _ => Vec::new(),
                };
                let overrides = EnvLoader::default().strip_prefix(pairs);

                let mut config = SanitizerConfig::default();
                config.apply_overrides(&overrides)?;
                Ok(config)
            }
            FileFormat::Json | FileFormat::Toml => SanitizerConfig::from_value(value),
        }
    }

    /// Parse configuration from string
    pub fn parse(&self, content: &str) -> Result<Value> {
        match self.format {
            FileFormat::Json => self.parse_json(content),
            FileFormat::Toml => self.parse_toml(content),
            FileFormat::Env => self.parse_env(content),
        }
    }

    fn parse_json(&self, content: &str) -> Result<Value> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))
    }

    fn parse_toml(&self, content: &str) -> Result<Value> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        serde_json::to_value(toml_value).map_err(|e| ConfigError::SerializationError(e.to_string()))
    }

    fn parse_env(&self, content: &str) -> Result<Value> {
        let mut map = serde_json::Map::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().trim_start_matches("export ").trim();
                let value = value.trim().trim_matches('"').trim_matches('\'');
                map.insert(key.to_string(), Value::String(value.to_string()));
            }
        }

        Ok(Value::Object(map))
    }
}
