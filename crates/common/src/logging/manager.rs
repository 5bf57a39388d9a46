//! Subscriber installation.

use std::io;

use thiserror::Error;
use tracing::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    filter::ParseError,
    fmt::{format::FmtSpan, layer, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer,
};

use super::types::{LogFormat, LoggerConfig};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log directive: {0}")]
    Directive(#[from] ParseError),

    #[error("unknown log rotation {0}, expected minutely, hourly, daily or never")]
    Rotation(String),

    #[error("failed to install subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Builds the filter, honoring `RUST_LOG` over the configured level.
///
/// Sled's internal logs are capped at WARN unless `RUST_LOG` says otherwise.
pub(crate) fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    let filt = EnvFilter::builder()
        .with_default_directive(level.parse()?)
        .from_env_lossy()
        .add_directive("sled=warn".parse()?);
    Ok(filt)
}

/// One fmt layer writing to `writer`.
///
/// Span close events are kept so `#[instrument]`ed calls report their
/// duration.
fn fmt_layer<S, W>(
    format: LogFormat,
    writer: W,
    ansi: bool,
    filt: EnvFilter,
) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(ansi)
        .with_writer(writer);
    match format {
        LogFormat::Compact => base.compact().with_filter(filt).boxed(),
        LogFormat::Json => base.json().with_filter(filt).boxed(),
    }
}

/// Installs the global subscriber: stderr always, rolling files if
/// configured.
///
/// Fails if a global subscriber is already installed.
pub fn init(config: LoggerConfig) -> Result<(), LoggingError> {
    let filt = build_filter(&config.level)?;

    let stderr_layer = fmt_layer(config.stderr_format, io::stderr, true, filt.clone());

    let file_layer = config.file.as_ref().map(|file| {
        let appender = RollingFileAppender::new(
            file.rotation.clone(),
            &file.directory,
            &file.file_name_prefix,
        );
        fmt_layer(file.format, appender, false, filt.clone())
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    info!(
        service_name = %config.service_name,
        service_version = ?config.service_version,
        "logging initialized"
    );
    Ok(())
}
