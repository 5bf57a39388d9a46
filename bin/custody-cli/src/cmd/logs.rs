use argh::FromArgs;
use custody_cli_common::errors::{DisplayableError, DisplayedError};

use super::SledHost;
use crate::{
    cli::OutputFormat,
    output::{logs::LogsInfo, output},
};

/// Lists committed logs in index order
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-logs")]
pub(crate) struct GetLogsArgs {
    /// first log index to show
    #[argh(option, default = "0")]
    pub(crate) start: u64,

    /// maximum number of logs to show
    #[argh(option, default = "50")]
    pub(crate) limit: usize,

    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

pub(crate) fn get_logs(host: &SledHost, args: GetLogsArgs) -> Result<(), DisplayedError> {
    let entries = host
        .get_logs_from(args.start, args.limit)
        .internal_error("Failed to read logs")?;
    let info = LogsInfo {
        total: host.log_count(),
        entries,
    };
    output(&info, args.output_format)
}
