use config::{Config, ConfigError, Environment, File};
use log::warn;
use serde::Deserialize;
use std::time::Duration;

use crate::url_to_text::fetchers::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RecipeCoreConfig {
    /// Page fetching configuration
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

/// Configuration for page requests
#[derive(Debug, Deserialize, Clone)]
pub struct FetcherConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetcherConfig {
    /// Request timeout. Zero would fail every fetch, so it means the default.
    pub fn timeout(&self) -> Duration {
        if self.timeout == 0 {
            warn!("Ignoring fetcher timeout of 0 seconds, using {DEFAULT_TIMEOUT:?}");
            return DEFAULT_TIMEOUT;
        }
        Duration::from_secs(self.timeout)
    }
}

// Default value functions
fn default_timeout() -> u64 {
    12
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl RecipeCoreConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPECORE__ prefix
    /// 2. recipecore.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPECORE__FETCHER__TIMEOUT
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`RecipeCoreConfig::load`] for the order sources are applied in.
pub fn load_config() -> Result<RecipeCoreConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipecore").required(false))
        // Use double underscore for nested: RECIPECORE__FETCHER__USER_AGENT
        .add_source(
            Environment::with_prefix("RECIPECORE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
