//! Supply controller.
//!
//! Sits between the bridge and the token. Only the registered bridge may mint
//! or burn, only the owner may pause. The controller owns the token and
//! forwards to it acting as its own address.

use custody_bridge_types::ControllerLog;
use custody_primitives::Address;
use custody_state::StateAccessor;
use tracing::debug;

use crate::{
    error::{AuthError, BridgeResult, ValidationError},
    members,
    output::ExecOutput,
    token,
};

fn ensure_owner(state: &impl StateAccessor, caller: &Address) -> BridgeResult<()> {
    if state.controller().owner() != caller {
        return Err(AuthError::NotOwner(*caller).into());
    }
    Ok(())
}

fn ensure_bridge(state: &impl StateAccessor, caller: &Address) -> BridgeResult<()> {
    if state.controller().bridge() != caller {
        return Err(AuthError::NotBridge(*caller).into());
    }
    Ok(())
}

/// Mints `amount` new tokens to `to`. Bridge only.
pub fn mint(
    state: &mut impl StateAccessor,
    out: &mut ExecOutput,
    caller: &Address,
    to: &Address,
    amount: u64,
) -> BridgeResult<()> {
    ensure_bridge(state, caller)?;
    if to.is_zero() {
        return Err(ValidationError::ZeroAddress.into());
    }
    let this = *state.controller().address();
    token::mint(state, out, &this, to, amount)
}

/// Burns `amount` tokens out of the controller's own custody balance. Bridge
/// only.
pub fn burn(
    state: &mut impl StateAccessor,
    out: &mut ExecOutput,
    caller: &Address,
    amount: u64,
) -> BridgeResult<()> {
    ensure_bridge(state, caller)?;
    let this = *state.controller().address();
    token::burn(state, out, &this, amount)
}

pub fn pause(
    state: &mut impl StateAccessor,
    out: &mut ExecOutput,
    caller: &Address,
) -> BridgeResult<()> {
    ensure_owner(state, caller)?;
    let this = *state.controller().address();
    token::pause(state, out, &this)?;
    out.emit_log(ControllerLog::Paused);
    debug!("token paused");
    Ok(())
}

pub fn unpause(
    state: &mut impl StateAccessor,
    out: &mut ExecOutput,
    caller: &Address,
) -> BridgeResult<()> {
    ensure_owner(state, caller)?;
    let this = *state.controller().address();
    token::unpause(state, out, &this)?;
    out.emit_log(ControllerLog::Unpaused);
    debug!("token unpaused");
    Ok(())
}

/// Records the bridge authority. Owner only.
pub fn set_bridge(
    state: &mut impl StateAccessor,
    out: &mut ExecOutput,
    caller: &Address,
    bridge: Address,
) -> BridgeResult<()> {
    ensure_owner(state, caller)?;
    if bridge.is_zero() {
        return Err(ValidationError::ZeroAddress.into());
    }
    state.controller_mut().set_bridge(bridge);
    out.emit_log(ControllerLog::BridgeSet { bridge });
    debug!(%bridge, "bridge set");
    Ok(())
}

/// Always fails. Without an owner the bridge authority could never be
/// changed again.
pub fn renounce_ownership(_state: &impl StateAccessor, _caller: &Address) -> BridgeResult<()> {
    Err(AuthError::RenounceDisabled.into())
}

pub fn is_custodian(state: &impl StateAccessor, addr: &Address) -> bool {
    members::is_custodian(state, addr)
}

pub fn is_broker(state: &impl StateAccessor, addr: &Address) -> bool {
    members::is_broker(state, addr)
}

/// Address of the wrapped token.
pub fn token(state: &impl StateAccessor) -> Address {
    *state.controller().token()
}
