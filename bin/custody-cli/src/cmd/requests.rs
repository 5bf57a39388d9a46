use argh::FromArgs;
use custody_bridge_types::{RequestHash, RequestKind, RequestStatus};
use custody_cli_common::errors::DisplayedError;
use custody_state::BridgeState;
use custody_stf::queries;

use super::{read_state, SledHost};
use crate::{
    cli::{LedgerArg, OutputFormat},
    output::{
        output,
        requests::{LedgerSummary, RequestInfo, RequestNonceInfo, RequestsSummaryInfo},
    },
};

/// Shows a mint request by nonce
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-mint-request")]
pub(crate) struct GetMintRequestArgs {
    /// request nonce
    #[argh(positional)]
    pub(crate) nonce: u64,

    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

/// Shows a burn request by nonce
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-burn-request")]
pub(crate) struct GetBurnRequestArgs {
    /// request nonce
    #[argh(positional)]
    pub(crate) nonce: u64,

    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

/// Resolves a request hash to its nonce
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-request-nonce")]
pub(crate) struct GetRequestNonceArgs {
    /// ledger to search: "mint" or "burn"
    #[argh(positional)]
    pub(crate) ledger: LedgerArg,

    /// request hash in hex
    #[argh(positional)]
    pub(crate) request_hash: RequestHash,

    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

/// Shows ledger lengths and status counts
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-requests-summary")]
pub(crate) struct GetRequestsSummaryArgs {
    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

fn show_request(
    host: &SledHost,
    kind: RequestKind,
    nonce: u64,
    format: OutputFormat,
) -> Result<(), DisplayedError> {
    let request = read_state(host, |state| queries::get_request(state, kind, nonce))?
        .ok_or_else(|| DisplayedError::user(format!("no {kind} request"), nonce))?;
    output(&RequestInfo { request }, format)
}

pub(crate) fn get_mint_request(
    host: &SledHost,
    args: GetMintRequestArgs,
) -> Result<(), DisplayedError> {
    show_request(host, RequestKind::Mint, args.nonce, args.output_format)
}

pub(crate) fn get_burn_request(
    host: &SledHost,
    args: GetBurnRequestArgs,
) -> Result<(), DisplayedError> {
    show_request(host, RequestKind::Burn, args.nonce, args.output_format)
}

pub(crate) fn get_request_nonce(
    host: &SledHost,
    args: GetRequestNonceArgs,
) -> Result<(), DisplayedError> {
    let LedgerArg(kind) = args.ledger;
    let nonce = read_state(host, |state| {
        queries::get_request_nonce(state, kind, &args.request_hash)
    })?;
    let info = RequestNonceInfo {
        kind,
        request_hash: args.request_hash,
        nonce,
    };
    output(&info, args.output_format)
}

fn summarize(state: &BridgeState, kind: RequestKind) -> LedgerSummary {
    let mut summary = LedgerSummary {
        length: state.ledger(kind).len(),
        pending: 0,
        approved: 0,
        rejected: 0,
        canceled: 0,
    };
    for req in state.ledger(kind).requests() {
        match req.status() {
            RequestStatus::Pending => summary.pending += 1,
            RequestStatus::Approved => summary.approved += 1,
            RequestStatus::Rejected => summary.rejected += 1,
            RequestStatus::Canceled => summary.canceled += 1,
        }
    }
    summary
}

pub(crate) fn get_requests_summary(
    host: &SledHost,
    args: GetRequestsSummaryArgs,
) -> Result<(), DisplayedError> {
    let info = read_state(host, |state| RequestsSummaryInfo {
        mint: summarize(state, RequestKind::Mint),
        burn: summarize(state, RequestKind::Burn),
    })?;
    output(&info, args.output_format)
}
