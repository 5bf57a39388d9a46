//! Per-broker deposit address bindings.

use custody_bridge_types::DepositAddressLog;
use custody_primitives::Address;
use custody_state::StateAccessor;
use tracing::debug;

use super::{ensure_broker, ensure_custodian, ensure_len};
use crate::{
    context::CallContext,
    error::{BridgeResult, ValidationError},
    output::ExecOutput,
};

/// Sets the foreign-network address where `broker` must send assets to be
/// credited with a mint. Custodian only.
pub fn set_custodian_deposit_address(
    state: &mut impl StateAccessor,
    ctx: &CallContext,
    out: &mut ExecOutput,
    broker: Address,
    deposit_address: String,
) -> BridgeResult<()> {
    ensure_custodian(state, ctx)?;
    if broker.is_zero() {
        return Err(ValidationError::ZeroAddress.into());
    }
    if !state.members().is_broker(&broker) {
        return Err(ValidationError::NotABroker(broker).into());
    }
    if deposit_address.is_empty() {
        return Err(ValidationError::EmptyDepositAddress.into());
    }
    ensure_len("deposit address", &deposit_address)?;

    state.set_custodian_deposit_address(broker, deposit_address.clone());
    debug!(%broker, %deposit_address, "custodian deposit address set");
    out.emit_log(DepositAddressLog::CustodianDepositAddressSet {
        broker,
        sender: *ctx.sender(),
        deposit_address,
    });
    Ok(())
}

/// Sets the sender's own burn destination. Broker only.
pub fn set_broker_deposit_address(
    state: &mut impl StateAccessor,
    ctx: &CallContext,
    out: &mut ExecOutput,
    deposit_address: String,
) -> BridgeResult<()> {
    ensure_broker(state, ctx)?;
    if deposit_address.is_empty() {
        return Err(ValidationError::EmptyDepositAddress.into());
    }
    ensure_len("deposit address", &deposit_address)?;

    let broker = *ctx.sender();
    state.set_broker_deposit_address(broker, deposit_address.clone());
    debug!(%broker, %deposit_address, "broker deposit address set");
    out.emit_log(DepositAddressLog::BrokerDepositAddressSet {
        broker,
        deposit_address,
    });
    Ok(())
}
