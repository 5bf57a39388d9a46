use argh::FromArgs;
use custody_cli_common::errors::DisplayedError;
use custody_primitives::Address;
use custody_state::StateAccessor;
use custody_stf::{queries, token};

use super::{read_state, SledHost};
use crate::{
    cli::OutputFormat,
    output::{
        members::{BalanceInfo, DepositAddressesInfo, MembersInfo},
        output,
    },
};

/// Shows the role registry, controller wiring and pause flag
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-members")]
pub(crate) struct GetMembersArgs {
    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

/// Shows the token balance of an address
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-balance")]
pub(crate) struct GetBalanceArgs {
    /// holder address in hex
    #[argh(positional)]
    pub(crate) holder: Address,

    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

/// Shows both deposit addresses bound to a broker
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-deposit-addresses")]
pub(crate) struct GetDepositAddressesArgs {
    /// broker address in hex
    #[argh(positional)]
    pub(crate) broker: Address,

    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

pub(crate) fn get_members(host: &SledHost, args: GetMembersArgs) -> Result<(), DisplayedError> {
    let info = read_state(host, |state| MembersInfo {
        members: queries::get_members(state),
        total_supply: token::total_supply(state),
    })?;
    output(&info, args.output_format)
}

pub(crate) fn get_balance(host: &SledHost, args: GetBalanceArgs) -> Result<(), DisplayedError> {
    let balance = read_state(host, |state| token::balance_of(state, &args.holder))?;
    let info = BalanceInfo {
        holder: args.holder,
        balance,
    };
    output(&info, args.output_format)
}

pub(crate) fn get_deposit_addresses(
    host: &SledHost,
    args: GetDepositAddressesArgs,
) -> Result<(), DisplayedError> {
    let broker = args.broker;
    let info = read_state(host, |state| DepositAddressesInfo {
        broker,
        is_broker: state.members().is_broker(&broker),
        custodian_deposit_address: queries::custodian_deposit_address(state, &broker),
        broker_deposit_address: queries::broker_deposit_address(state, &broker),
    })?;
    output(&info, args.output_format)
}
