//! Wrapped token primitive.
//!
//! Every function takes the acting principal explicitly since the same
//! operation is reached both by end users and by the controller or bridge
//! acting as themselves.

use custody_bridge_types::TokenLog;
use custody_primitives::Address;
use custody_state::StateAccessor;

use crate::{
    error::{BridgeResult, TokenError},
    output::ExecOutput,
};

fn ensure_not_paused(state: &impl StateAccessor) -> Result<(), TokenError> {
    if state.token().paused() {
        return Err(TokenError::Paused);
    }
    Ok(())
}

fn ensure_token_owner(state: &impl StateAccessor, caller: &Address) -> Result<(), TokenError> {
    if state.token().owner() != caller {
        return Err(TokenError::NotTokenOwner(*caller));
    }
    Ok(())
}

pub fn balance_of(state: &impl StateAccessor, holder: &Address) -> u64 {
    state.balance_of(holder)
}

pub fn allowance(state: &impl StateAccessor, owner: &Address, spender: &Address) -> u64 {
    state.allowance(owner, spender)
}

pub fn total_supply(state: &impl StateAccessor) -> u64 {
    state.token().total_supply()
}

/// Moves balance without any allowance or pause checks.
fn move_balance(
    state: &mut impl StateAccessor,
    from: &Address,
    to: &Address,
    amount: u64,
) -> Result<(), TokenError> {
    if to.is_zero() {
        return Err(TokenError::ZeroAddress);
    }

    let from_bal = state.balance_of(from);
    if from_bal < amount {
        return Err(TokenError::InsufficientBalance {
            have: from_bal,
            need: amount,
        });
    }

    if from == to {
        return Ok(());
    }

    let to_bal = state
        .balance_of(to)
        .checked_add(amount)
        .ok_or(TokenError::Overflow)?;
    state.set_balance(*from, from_bal - amount);
    state.set_balance(*to, to_bal);
    Ok(())
}

pub fn transfer(
    state: &mut impl StateAccessor,
    out: &mut ExecOutput,
    sender: &Address,
    to: &Address,
    amount: u64,
) -> BridgeResult<()> {
    ensure_not_paused(state)?;
    move_balance(state, sender, to, amount)?;
    out.emit_log(TokenLog::Transfer {
        from: *sender,
        to: *to,
        amount,
    });
    Ok(())
}

/// Sets `spender`'s allowance over `owner`'s balance, replacing any previous
/// value.
pub fn approve(
    state: &mut impl StateAccessor,
    out: &mut ExecOutput,
    owner: &Address,
    spender: &Address,
    amount: u64,
) -> BridgeResult<()> {
    ensure_not_paused(state)?;
    if spender.is_zero() {
        return Err(TokenError::ZeroAddress.into());
    }
    state.set_allowance(*owner, *spender, amount);
    out.emit_log(TokenLog::Approval {
        owner: *owner,
        spender: *spender,
        amount,
    });
    Ok(())
}

/// Moves `amount` from `from` to `to` on `spender`'s allowance.
pub fn transfer_from(
    state: &mut impl StateAccessor,
    out: &mut ExecOutput,
    spender: &Address,
    from: &Address,
    to: &Address,
    amount: u64,
) -> BridgeResult<()> {
    ensure_not_paused(state)?;

    let allowed = state.allowance(from, spender);
    if allowed < amount {
        return Err(TokenError::InsufficientAllowance {
            have: allowed,
            need: amount,
        }
        .into());
    }

    move_balance(state, from, to, amount)?;
    state.set_allowance(*from, *spender, allowed - amount);
    out.emit_log(TokenLog::Transfer {
        from: *from,
        to: *to,
        amount,
    });
    Ok(())
}

pub fn increase_allowance(
    state: &mut impl StateAccessor,
    out: &mut ExecOutput,
    owner: &Address,
    spender: &Address,
    added: u64,
) -> BridgeResult<()> {
    let current = state.allowance(owner, spender);
    let new = current.checked_add(added).ok_or(TokenError::Overflow)?;
    approve(state, out, owner, spender, new)
}

/// Lowers an allowance. Fails rather than saturating at zero.
pub fn decrease_allowance(
    state: &mut impl StateAccessor,
    out: &mut ExecOutput,
    owner: &Address,
    spender: &Address,
    subtracted: u64,
) -> BridgeResult<()> {
    let current = state.allowance(owner, spender);
    let new = current
        .checked_sub(subtracted)
        .ok_or(TokenError::InsufficientAllowance {
            have: current,
            need: subtracted,
        })?;
    approve(state, out, owner, spender, new)
}

/// Creates tokens. Owner only.
pub fn mint(
    state: &mut impl StateAccessor,
    out: &mut ExecOutput,
    caller: &Address,
    to: &Address,
    amount: u64,
) -> BridgeResult<()> {
    ensure_token_owner(state, caller)?;
    ensure_not_paused(state)?;
    if to.is_zero() {
        return Err(TokenError::ZeroAddress.into());
    }

    let supply = state
        .token()
        .total_supply()
        .checked_add(amount)
        .ok_or(TokenError::Overflow)?;
    let bal = state
        .balance_of(to)
        .checked_add(amount)
        .ok_or(TokenError::Overflow)?;

    state.token_mut().set_total_supply(supply);
    state.set_balance(*to, bal);
    out.emit_log(TokenLog::Mint { to: *to, amount });
    Ok(())
}

/// Destroys tokens held by the owner itself. Owner only.
pub fn burn(
    state: &mut impl StateAccessor,
    out: &mut ExecOutput,
    caller: &Address,
    amount: u64,
) -> BridgeResult<()> {
    ensure_token_owner(state, caller)?;
    ensure_not_paused(state)?;

    let bal = state.balance_of(caller);
    if bal < amount {
        return Err(TokenError::InsufficientBalance {
            have: bal,
            need: amount,
        }
        .into());
    }
    // Supply always covers any single balance.
    let supply = state.token().total_supply().saturating_sub(amount);

    state.set_balance(*caller, bal - amount);
    state.token_mut().set_total_supply(supply);
    out.emit_log(TokenLog::Burn {
        from: *caller,
        amount,
    });
    Ok(())
}

pub fn pause(
    state: &mut impl StateAccessor,
    out: &mut ExecOutput,
    caller: &Address,
) -> BridgeResult<()> {
    ensure_token_owner(state, caller)?;
    ensure_not_paused(state)?;
    state.token_mut().set_paused(true);
    out.emit_log(TokenLog::Pause);
    Ok(())
}

pub fn unpause(
    state: &mut impl StateAccessor,
    out: &mut ExecOutput,
    caller: &Address,
) -> BridgeResult<()> {
    ensure_token_owner(state, caller)?;
    if !state.token().paused() {
        return Err(TokenError::NotPaused.into());
    }
    state.token_mut().set_paused(false);
    out.emit_log(TokenLog::Unpause);
    Ok(())
}
