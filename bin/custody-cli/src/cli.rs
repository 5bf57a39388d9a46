use std::{path::PathBuf, str::FromStr};

use argh::FromArgs;
use custody_bridge_types::RequestKind;

use crate::cmd::{
    genesis::InitGenesisArgs,
    logs::GetLogsArgs,
    members::{GetBalanceArgs, GetDepositAddressesArgs, GetMembersArgs},
    requests::{
        GetBurnRequestArgs, GetMintRequestArgs, GetRequestNonceArgs, GetRequestsSummaryArgs,
    },
    submit::SubmitArgs,
};

/// Operator tool for a custodial bridge instance.
#[derive(FromArgs, PartialEq, Debug)]
pub(crate) struct Cli {
    /// path to the TOML config file
    #[argh(option, short = 'c')]
    pub(crate) config: PathBuf,

    /// overrides `client.datadir` from the config
    #[argh(option, short = 'd')]
    pub(crate) datadir: Option<PathBuf>,

    #[argh(subcommand)]
    pub(crate) cmd: Command,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Command {
    InitGenesis(InitGenesisArgs),
    Submit(SubmitArgs),
    GetMintRequest(GetMintRequestArgs),
    GetBurnRequest(GetBurnRequestArgs),
    GetRequestNonce(GetRequestNonceArgs),
    GetRequestsSummary(GetRequestsSummaryArgs),
    GetMembers(GetMembersArgs),
    GetBalance(GetBalanceArgs),
    GetDepositAddresses(GetDepositAddressesArgs),
    GetLogs(GetLogsArgs),
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum OutputFormat {
    Porcelain,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "porcelain" => Ok(OutputFormat::Porcelain),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format {other}")),
        }
    }
}

/// Ledger selector for commands that take `mint` or `burn`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct LedgerArg(pub(crate) RequestKind);

impl FromStr for LedgerArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mint" => Ok(LedgerArg(RequestKind::Mint)),
            "burn" => Ok(LedgerArg(RequestKind::Burn)),
            other => Err(format!("unknown ledger {other}, expected mint or burn")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit() {
        let cli = Cli::from_args(
            &["custody-cli"],
            &[
                "-c",
                "custody.toml",
                "submit",
                "--sender",
                "1010101010101010101010101010101010101010",
                r#"{"op":"burn","amount":5}"#,
            ],
        )
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("custody.toml"));
        assert!(cli.datadir.is_none());
        let Command::Submit(args) = cli.cmd else {
            panic!("expected submit");
        };
        assert_eq!(args.timestamp, None);
        assert_eq!(args.output_format, OutputFormat::Porcelain);
    }

    #[test]
    fn test_parse_request_nonce() {
        let cli = Cli::from_args(
            &["custody-cli"],
            &[
                "-c",
                "c.toml",
                "-d",
                "/tmp/data",
                "get-request-nonce",
                "burn",
                "0x0000000000000000000000000000000000000000000000000000000000000001",
                "-o",
                "json",
            ],
        )
        .unwrap();
        assert_eq!(cli.datadir, Some(PathBuf::from("/tmp/data")));
        let Command::GetRequestNonce(args) = cli.cmd else {
            panic!("expected get-request-nonce");
        };
        assert_eq!(args.ledger, LedgerArg(RequestKind::Burn));
        assert_eq!(args.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_bad_ledger_rejected() {
        assert!("swap".parse::<LedgerArg>().is_err());
        assert!("JSON".parse::<OutputFormat>().is_ok());
    }
}
