//! Logger settings assembled by binaries before [`init`](super::init).

use std::path::PathBuf;

use tracing_appender::rolling::Rotation;

use super::LoggingError;

/// Filter used when neither `RUST_LOG` nor the config sets a level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Line format of a log sink.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

/// Parses a rotation name as written in config files.
pub fn parse_rotation(s: &str) -> Result<Rotation, LoggingError> {
    match s.to_ascii_lowercase().as_str() {
        "minutely" => Ok(Rotation::MINUTELY),
        "hourly" => Ok(Rotation::HOURLY),
        "daily" => Ok(Rotation::DAILY),
        "never" => Ok(Rotation::NEVER),
        other => Err(LoggingError::Rotation(other.to_owned())),
    }
}

/// Rolling log files, written next to the stderr output.
#[derive(Debug, Clone)]
pub struct FileLoggingConfig {
    pub directory: PathBuf,
    /// File names are `<prefix>.<date>`.
    pub file_name_prefix: String,
    pub rotation: Rotation,
    pub format: LogFormat,
}

impl FileLoggingConfig {
    /// Daily rotated compact logs under `directory`.
    pub fn new(directory: PathBuf, file_name_prefix: String) -> Self {
        Self {
            directory,
            file_name_prefix,
            rotation: Rotation::DAILY,
            format: LogFormat::Compact,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Name reported in the startup line, see
    /// [`format_service_name`](super::format_service_name).
    pub service_name: String,
    pub service_version: Option<String>,
    /// Directive applied when `RUST_LOG` is unset.
    pub level: String,
    pub stderr_format: LogFormat,
    pub file: Option<FileLoggingConfig>,
}

impl LoggerConfig {
    pub fn new(service_name: String) -> Self {
        Self {
            service_name,
            service_version: None,
            level: DEFAULT_LOG_LEVEL.to_owned(),
            stderr_format: LogFormat::Compact,
            file: None,
        }
    }

    pub fn with_service_version(mut self, version: String) -> Self {
        self.service_version = Some(version);
        self
    }

    pub fn with_level(mut self, level: String) -> Self {
        self.level = level;
        self
    }

    pub fn with_stderr_format(mut self, format: LogFormat) -> Self {
        self.stderr_format = format;
        self
    }

    pub fn with_file_logging(mut self, file: FileLoggingConfig) -> Self {
        self.file = Some(file);
        self
    }
}
