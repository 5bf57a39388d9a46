//! Operator entry point for a custodial bridge instance.
//!
//! Loads the TOML config, opens the sled datadir and dispatches one
//! subcommand against the bridge host.
mod cli;
mod cmd;
mod output;

use std::process;

use custody_bridge_worker::BridgeHost;
use custody_cli_common::errors::{DisplayableError, DisplayedError};
use custody_common::logging::{init_logging_from_config, LoggingInitConfig};
use custody_config::Config;
use custody_db_store_sled::{open_sled_bridge_db, SledDbConfig, SLED_NAME};
use tracing::debug;

use crate::{
    cli::{Cli, Command},
    cmd::{
        genesis::init_genesis,
        logs::get_logs,
        members::{get_balance, get_deposit_addresses, get_members},
        requests::{get_burn_request, get_mint_request, get_request_nonce, get_requests_summary},
        submit::submit,
    },
};

fn main() {
    let cli: Cli = argh::from_env();

    if let Err(e) = run(cli) {
        eprintln!("{e}");
        process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), DisplayedError> {
    let config = Config::load(&cli.config).user_error("Failed to load config")?;

    init_logging_from_config(LoggingInitConfig {
        service_base_name: "custody-cli",
        service_label: config.logging.service_label.as_deref(),
        level: config.logging.level.as_deref(),
        log_dir: config.logging.log_dir.as_deref(),
        log_file_prefix: config.logging.log_file_prefix.as_deref(),
        log_rotation: config.logging.log_rotation.as_deref(),
        json_format: config.logging.json_format,
        default_log_prefix: "custody",
    })
    .user_error("Failed to initialize logging")?;

    let datadir = cli.datadir.unwrap_or_else(|| config.client.datadir.clone());
    debug!(datadir = %datadir.display(), "opening database");
    let ops_config = SledDbConfig::new_with_constant_backoff(
        config.client.db_retry_count,
        config.client.db_retry_delay_ms,
    );
    let db = open_sled_bridge_db(&datadir, SLED_NAME, ops_config)
        .internal_error("Failed to open database")?;
    let host = BridgeHost::open(db).internal_error("Failed to load bridge state")?;

    match cli.cmd {
        Command::InitGenesis(args) => init_genesis(&host, &config, args),
        Command::Submit(args) => submit(&host, args),
        Command::GetMintRequest(args) => get_mint_request(&host, args),
        Command::GetBurnRequest(args) => get_burn_request(&host, args),
        Command::GetRequestNonce(args) => get_request_nonce(&host, args),
        Command::GetRequestsSummary(args) => get_requests_summary(&host, args),
        Command::GetMembers(args) => get_members(&host, args),
        Command::GetBalance(args) => get_balance(&host, args),
        Command::GetDepositAddresses(args) => get_deposit_addresses(&host, args),
        Command::GetLogs(args) => get_logs(&host, args),
    }
}
