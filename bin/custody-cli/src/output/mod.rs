//! Rendering of command results.

pub(crate) mod helpers;
pub(crate) mod logs;
pub(crate) mod members;
pub(crate) mod requests;
pub(crate) mod submit;
pub(crate) mod traits;

use custody_cli_common::errors::{DisplayableError, DisplayedError};
use serde::Serialize;

use self::traits::Formattable;
use crate::cli::OutputFormat;

/// Renders `data` in the chosen format.
pub(crate) fn render<T: Formattable + Serialize>(
    data: &T,
    format: OutputFormat,
) -> Result<String, DisplayedError> {
    match format {
        OutputFormat::Porcelain => Ok(data.format_porcelain()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(data).internal_error("Failed to serialize output")
        }
    }
}

/// Prints `data` to stdout in the chosen format.
pub(crate) fn output<T: Formattable + Serialize>(
    data: &T,
    format: OutputFormat,
) -> Result<(), DisplayedError> {
    println!("{}", render(data, format)?);
    Ok(())
}
