use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use config::{Config, ConfigBuilder, ConfigError, builder::DefaultState};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// How many movies the browse and analytics pages ask for on mount.
    pub page_limit: u32,
    /// How many movies the home page asks for; its shelves draw from a
    /// smaller candidate set.
    pub home_limit: u32,
    /// Delay before a successful rating form clears itself.
    pub rating_reset_ms: u64,
}

impl Settings {
    /// Defaults, then `config/default.*` if present, then `APP_*` environment
    /// variables (`APP_API__BASE_URL=http://...`).
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );

        Self::finish(builder)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?.add_source(config::File::from(path.as_ref()));
        Self::finish(builder)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.timeout_secs", 30_i64)?
            .set_default("catalog.page_limit", 200_i64)?
            .set_default("catalog.home_limit", 100_i64)?
            .set_default("catalog.rating_reset_ms", 3000_i64)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;

        debug!(
            base_url = %settings.api.base_url,
            headers = ?settings.api.headers,
            page_limit = settings.catalog.page_limit,
            home_limit = settings.catalog.home_limit,
            "Loaded settings"
        );

        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: 30,
                headers: HashMap::new(),
            },
            catalog: CatalogConfig {
                page_limit: 200,
                home_limit: 100,
                rating_reset_ms: 3000,
            },
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CatalogConfig {
    pub fn rating_reset_delay(&self) -> Duration {
        Duration::from_millis(self.rating_reset_ms)
    }
}
