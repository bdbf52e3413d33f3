// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;

/// Prefix of every environment override
pub const DEFAULT_PREFIX: &str = "SCRUBKIT";

/// Environment variable loader
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Load all prefixed environment variables, keyed without the prefix
    /// and lower-cased: `SCRUBKIT_URL_PROTOCOLS` becomes `url_protocols`.
    pub fn load(&self) -> Result<HashMap<String, String>> {
        Ok(self.strip_prefix(env::vars()))
    }

    /// Keep the prefixed pairs of `vars`, keyed as in [`EnvLoader::load`]
    pub fn strip_prefix<I>(&self, vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = HashMap::new();

        for (key, value) in vars {
            if let Some(rest) = key.strip_prefix(&self.prefix) {
                if let Some(name) = rest.strip_prefix('_') {
                    config.insert(name.to_lowercase(), value);
                }
            }
        }

        config
    }

    /// Load a specific environment variable
    pub fn load_var(&self, key: &str) -> Result<String> {
        let full_key = format!("{}_{}", self.prefix, key.to_uppercase());
        env::var(&full_key).map_err(ConfigError::EnvError)
    }

    /// Load with default value
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Read a `.env` file into the process environment. Without a path a
    /// missing `.env` in the working directory is not an error.
    pub fn load_dotenv(&self, path: Option<&str>) -> Result<()> {
        if let Some(path) = path {
            dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
        } else {
            dotenvy::dotenv().ok();
        }
        Ok(())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}
