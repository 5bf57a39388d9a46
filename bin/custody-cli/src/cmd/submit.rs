use std::time::{SystemTime, UNIX_EPOCH};

use argh::FromArgs;
use custody_bridge_worker::HostError;
use custody_cli_common::errors::{DisplayableError, DisplayedError};
use custody_primitives::Address;
use custody_stf::{BridgeCall, CallContext};

use super::SledHost;
use crate::{
    cli::OutputFormat,
    output::{output, submit::SubmitInfo},
};

/// Executes one call as `sender` and commits it
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "submit")]
pub(crate) struct SubmitArgs {
    /// address the call is made from
    #[argh(option)]
    pub(crate) sender: Address,

    /// block timestamp in seconds, defaults to the current time
    #[argh(option)]
    pub(crate) timestamp: Option<u64>,

    /// call as JSON, e.g. {"op":"pause"}
    #[argh(positional)]
    pub(crate) call: String,

    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

fn unix_now() -> Result<u64, DisplayedError> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .internal_error("System clock is before the unix epoch")?;
    Ok(elapsed.as_secs())
}

pub(crate) fn submit(host: &SledHost, args: SubmitArgs) -> Result<(), DisplayedError> {
    let call: BridgeCall = serde_json::from_str(&args.call).user_error("Invalid call JSON")?;
    let timestamp = match args.timestamp {
        Some(ts) => ts,
        None => unix_now()?,
    };
    let ctx = CallContext::new(args.sender, timestamp);
    let op = call.name();

    let outcome = match host.submit(&ctx, call) {
        Ok(outcome) => outcome,
        Err(err @ (HostError::Bridge(_) | HostError::NotInitialized)) => {
            return Err(DisplayedError::user(format!("{op} rejected"), err));
        }
        Err(err) => {
            return Err(DisplayedError::InternalError(
                format!("{op} failed"),
                Box::new(err),
            ));
        }
    };

    let info = SubmitInfo {
        op,
        ret: outcome.ret,
        logs: outcome.logs,
    };
    output(&info, args.output_format)
}
