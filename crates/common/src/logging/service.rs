//! Logging setup from a binary's config file.

use std::path::Path;

use tracing::info;

use super::{
    format_service_name, init, parse_rotation, FileLoggingConfig, LogFormat, LoggerConfig,
    LoggingError,
};

/// Logging settings as read from a binary's config.
#[derive(Debug)]
pub struct LoggingInitConfig<'a> {
    pub service_base_name: &'a str,
    /// Appended to the service name, e.g. "prod".
    pub service_label: Option<&'a str>,
    /// Level directive, used when `RUST_LOG` is unset.
    pub level: Option<&'a str>,
    /// Enables file logging when set.
    pub log_dir: Option<&'a Path>,
    pub log_file_prefix: Option<&'a str>,
    pub log_rotation: Option<&'a str>,
    pub json_format: Option<bool>,
    /// Used when `log_file_prefix` is unset.
    pub default_log_prefix: &'a str,
}

/// Builds the [`LoggerConfig`] described by `config`.
pub fn logger_config(config: &LoggingInitConfig<'_>) -> Result<LoggerConfig, LoggingError> {
    let service_name = format_service_name(config.service_base_name, config.service_label);
    let format = LogFormat::from_json_flag(config.json_format.unwrap_or(false));
    let mut lconfig = LoggerConfig::new(service_name)
        .with_service_version(env!("CARGO_PKG_VERSION").to_owned())
        .with_stderr_format(format);

    if let Some(level) = config.level {
        lconfig = lconfig.with_level(level.to_owned());
    }

    if let Some(dir) = config.log_dir {
        let prefix = config
            .log_file_prefix
            .unwrap_or(config.default_log_prefix)
            .to_owned();
        let mut file = FileLoggingConfig::new(dir.to_path_buf(), prefix).with_format(format);
        if let Some(rotation) = config.log_rotation {
            file = file.with_rotation(parse_rotation(rotation)?);
        }
        lconfig = lconfig.with_file_logging(file);
    }

    Ok(lconfig)
}

/// Builds the logger config and installs the global subscriber.
pub fn init_logging_from_config(config: LoggingInitConfig<'_>) -> Result<(), LoggingError> {
    let lconfig = logger_config(&config)?;
    let file = lconfig.file.clone();

    init(lconfig)?;

    if let Some(file) = file {
        info!(
            log_dir = %file.directory.display(),
            log_prefix = %file.file_name_prefix,
            "file logging enabled"
        );
    }
    Ok(())
}
