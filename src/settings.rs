use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::report::OutputFormat;
use crate::stats::windows::{WindowConfig, DEFAULT_LONG_WINDOW, DEFAULT_SHORT_WINDOW};

/// Looked up in the working directory, any extension `config` understands
pub const DEFAULT_CONFIG_FILE: &str = "stockstats";

/// Environment overrides, e.g. `STOCKSTATS__WINDOWS__LONG=10`
pub const ENV_PREFIX: &str = "STOCKSTATS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    pub format: OutputFormat,
    pub group_thousands: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestSettings {
    /// Reject records failing OHLC validation instead of warning
    pub strict_ohlc: bool,
}

/// Application settings
///
/// Layered lowest first: built-in defaults, optional `stockstats.toml`, an
/// explicit config file, then `STOCKSTATS__*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub windows: WindowConfig,
    pub report: ReportSettings,
    pub ingest: IngestSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            windows: WindowConfig::default(),
            report: ReportSettings {
                format: OutputFormat::Text,
                group_thousands: true,
            },
            ingest: IngestSettings { strict_ohlc: false },
        }
    }
}

impl Settings {
    /// Load settings from files and environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            defaults()?.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));

        if let Some(path) = path {
            tracing::debug!("Using config file {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Parse settings from TOML text layered over the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::finish(defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.windows
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("windows.short", DEFAULT_SHORT_WINDOW as i64)?
        .set_default("windows.long", DEFAULT_LONG_WINDOW as i64)?
        .set_default("windows.boundary", "inclusive")?
        .set_default("report.format", "text")?
        .set_default("report.group_thousands", true)?
        .set_default("ingest.strict_ohlc", false)?)
}
