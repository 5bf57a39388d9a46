use argh::FromArgs;
use custody_bridge_worker::HostError;
use custody_cli_common::errors::{DisplayableError, DisplayedError};
use custody_config::Config;
use custody_stf::{queries, token};
use tracing::info;

use super::{read_state, SledHost};
use crate::{
    cli::OutputFormat,
    output::{members::MembersInfo, output},
};

/// Writes the genesis state from the `[genesis]` config section
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "init-genesis")]
pub(crate) struct InitGenesisArgs {
    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

pub(crate) fn init_genesis(
    host: &SledHost,
    config: &Config,
    args: InitGenesisArgs,
) -> Result<(), DisplayedError> {
    let params = config
        .genesis
        .as_ref()
        .ok_or_else(|| DisplayedError::user("config has no [genesis] section", "genesis"))?;

    match host.init_genesis(params) {
        Err(err @ (HostError::AlreadyInitialized | HostError::Genesis(_))) => {
            return Err(DisplayedError::user("Failed to initialize genesis", err));
        }
        res => res.internal_error("Failed to initialize genesis")?,
    }
    info!("genesis written");

    let info = read_state(host, |state| MembersInfo {
        members: queries::get_members(state),
        total_supply: token::total_supply(state),
    })?;
    output(&info, args.output_format)
}
