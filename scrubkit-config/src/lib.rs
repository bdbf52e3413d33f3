// Configuration management for scrubkit sanitizers

pub mod env;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use env::{DEFAULT_PREFIX, EnvLoader};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use settings::{
    EmailSettings, FileSettings, HtmlSettings, MAX_NAME_LENGTH_LIMIT, SanitizerConfig,
    UrlSettings,
};
pub use validation::{ConfigValidator, Validate};

use tracing::debug;

/// Layers configuration sources into a validated [`SanitizerConfig`].
///
/// Later layers override earlier ones: defaults, then files, then the
/// environment.
///
/// ```no_run
/// use scrubkit_config::ConfigManager;
///
/// let config = ConfigManager::new()
///     .load_file("scrubkit.toml")?
///     .load_env()?
///     .build()?;
/// # Ok::<(), scrubkit_config::ConfigError>(())
/// ```
pub struct ConfigManager {
    config: SanitizerConfig,
    env: EnvLoader,
}

impl ConfigManager {
    /// Start from the defaults, reading `SCRUBKIT_*` variables
    pub fn new() -> Self {
        Self {
            config: SanitizerConfig::default(),
            env: EnvLoader::default(),
        }
    }

    /// Create with environment variable prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            config: SanitizerConfig::default(),
            env: EnvLoader::new(prefix),
        }
    }

    /// Replace the settings with a file's, detecting the format from its name
    pub fn load_file(mut self, path: &str) -> Result<Self> {
        let loader = ConfigLoader::auto(path)?;

        self.config = match loader.format() {
            FileFormat::Env => {
                let value = loader.load_file(path)?;
                let pairs = value
                    .as_object()
                    .map(|map| {
                        map.iter()
                            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default();

                let mut config = self.config;
                config.apply_overrides(&self.env.strip_prefix(pairs))?;
                config
            }
            FileFormat::Json | FileFormat::Toml => loader.load_config(path)?,
        };

        debug!(path, "loaded sanitizer configuration file");
        Ok(self)
    }

    /// Apply overrides from the process environment
    pub fn load_env(mut self) -> Result<Self> {
        let overrides = self.env.load()?;
        self.config.apply_overrides(&overrides)?;
        Ok(self)
    }

    /// Load a `.env` file into the environment, then apply it
    pub fn load_dotenv(self, path: Option<&str>) -> Result<Self> {
        self.env.load_dotenv(path)?;
        self.load_env()
    }

    /// Replace the settings outright
    pub fn with_config(mut self, config: SanitizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Current settings, not yet validated
    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    /// Validate and return the settings
    pub fn build(self) -> Result<SanitizerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
