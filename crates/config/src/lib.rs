//! Node configuration, loaded from TOML.

pub mod config;

pub use config::{ClientConfig, Config, ConfigError, LoggingConfig};
