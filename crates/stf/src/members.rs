//! Role registry operations.

use custody_bridge_types::MembersLog;
use custody_primitives::Address;
use custody_state::StateAccessor;
use tracing::debug;

use crate::{
    context::CallContext,
    error::{AuthError, BridgeResult, ValidationError},
    output::ExecOutput,
};

fn ensure_owner(state: &impl StateAccessor, ctx: &CallContext) -> BridgeResult<()> {
    if state.members().owner() != ctx.sender() {
        return Err(AuthError::NotOwner(*ctx.sender()).into());
    }
    Ok(())
}

/// Replaces the custodian.
pub fn set_custodian(
    state: &mut impl StateAccessor,
    ctx: &CallContext,
    out: &mut ExecOutput,
    custodian: Address,
) -> BridgeResult<()> {
    ensure_owner(state, ctx)?;
    if custodian.is_zero() {
        return Err(ValidationError::ZeroAddress.into());
    }

    state.members_mut().set_custodian(custodian);
    out.emit_log(MembersLog::CustodianSet { custodian });
    debug!(%custodian, "custodian set");
    Ok(())
}

pub fn add_broker(
    state: &mut impl StateAccessor,
    ctx: &CallContext,
    out: &mut ExecOutput,
    broker: Address,
) -> BridgeResult<()> {
    ensure_owner(state, ctx)?;
    if broker.is_zero() {
        return Err(ValidationError::ZeroAddress.into());
    }
    if state.members().is_broker(&broker) {
        return Err(ValidationError::BrokerAlreadyExists(broker).into());
    }

    state.members_mut().insert_broker(broker);
    out.emit_log(MembersLog::BrokerAdded { broker });
    debug!(%broker, "broker added");
    Ok(())
}

/// Deregisters a broker. Requests it already created are left as they are.
pub fn remove_broker(
    state: &mut impl StateAccessor,
    ctx: &CallContext,
    out: &mut ExecOutput,
    broker: Address,
) -> BridgeResult<()> {
    ensure_owner(state, ctx)?;
    if broker.is_zero() {
        return Err(ValidationError::ZeroAddress.into());
    }
    if !state.members().is_broker(&broker) {
        return Err(ValidationError::BrokerNotFound(broker).into());
    }

    state.members_mut().remove_broker(&broker);
    out.emit_log(MembersLog::BrokerRemoved { broker });
    debug!(%broker, "broker removed");
    Ok(())
}

pub fn is_custodian(state: &impl StateAccessor, addr: &Address) -> bool {
    state.members().is_custodian(addr)
}

pub fn is_broker(state: &impl StateAccessor, addr: &Address) -> bool {
    state.members().is_broker(addr)
}
