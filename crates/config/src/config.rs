use std::{
    fs, io,
    path::{Path, PathBuf},
};

use custody_state::GenesisParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default value for `datadir` in [`ClientConfig`].
const DEFAULT_DATADIR: &str = "custody-data";

/// Default DB retry count.
const DEFAULT_DB_RETRY_COUNT: u16 = 3;

/// Default DB retry delay in ms.
const DEFAULT_DB_RETRY_DELAY: u64 = 200;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// The data directory where database contents reside.
    #[serde(default = "default_datadir")]
    pub datadir: PathBuf,

    /// For optimistic transactions, how many times to retry if a write fails.
    #[serde(default = "default_db_retry_count")]
    pub db_retry_count: u16,

    /// Db retry delay in ms.
    #[serde(default = "default_db_retry_delay")]
    pub db_retry_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            datadir: default_datadir(),
            db_retry_count: default_db_retry_count(),
            db_retry_delay_ms: default_db_retry_delay(),
        }
    }
}

fn default_datadir() -> PathBuf {
    DEFAULT_DATADIR.into()
}

fn default_db_retry_count() -> u16 {
    DEFAULT_DB_RETRY_COUNT
}

fn default_db_retry_delay() -> u64 {
    DEFAULT_DB_RETRY_DELAY
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Service label to append to the service name (e.g., "prod", "dev").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_label: Option<String>,

    /// Level directive such as "debug" or "info,custody_stf=trace".
    /// `RUST_LOG` takes precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Directory path for file-based logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Prefix for log file names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_prefix: Option<String>,

    /// File rotation: minutely, hourly, daily or never.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_rotation: Option<String>,

    /// Use JSON format for logs instead of compact format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_format: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    /// Initial principals and token metadata. Only read by `init-genesis`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genesis: Option<GenesisParams>,

    /// Logging configuration (optional section in TOML).
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
