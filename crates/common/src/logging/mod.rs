//! Logging subsystem built on `tracing-subscriber`.

pub mod manager;
pub mod service;
pub mod types;


pub use manager::{init, LoggingError};
pub use service::{init_logging_from_config, logger_config, LoggingInitConfig};
pub use tracing_appender::rolling::Rotation;
pub use types::{parse_rotation, FileLoggingConfig, LogFormat, LoggerConfig, DEFAULT_LOG_LEVEL};

/// Formats a service name with an optional label suffix.
pub fn format_service_name(base: &str, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{base}%{label}"),
        None => base.to_owned(),
    }
}
