use std::path::Path;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Location of the span catalog document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    pub path: Option<String>,
}

impl CatalogConfig {
    /// ## Summary
    /// Returns the configured catalog path.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if no path is configured or it is blank.
    pub fn path(&self) -> CoreResult<&Path> {
        match self.path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => Ok(Path::new(path)),
            _ => Err(CoreError::InvalidConfiguration(
                "catalog.path is not set".to_string(),
            )),
        }
    }
}

/// Prefix of the environment variables read by [`environment`].
pub const ENV_PREFIX: &str = "RTIMESPAN";

const CONFIG_FILE: &str = "rtimespan.toml";

impl Settings {
    /// ## Summary
    /// Loads settings from defaults, an optional `rtimespan.toml` and
    /// `RTIMESPAN_`-prefixed environment variables, later sources winning.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::from_environment(environment())
    }

    /// ## Summary
    /// Same as [`Settings::load`] with an explicit environment source.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn from_environment(env: config::Environment) -> Result<Self> {
        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(env)
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Environment source for `RTIMESPAN_*` variables; `_` separates nested keys,
/// so `RTIMESPAN_CATALOG_PATH` sets `catalog.path`.
#[must_use]
pub fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("_")
        .ignore_empty(true)
        .try_parsing(true)
}

/// ## Summary
/// Loads settings after applying a `.env` file, if present, to the process environment.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
