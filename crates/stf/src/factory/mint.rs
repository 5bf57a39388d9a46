//! Mint request lifecycle.

use custody_bridge_types::{RequestAction, RequestHash, RequestKind, RequestLog, RequestStatus};
use custody_state::StateAccessor;
use tracing::debug;

use super::{
    append_pending_request, ensure_broker, ensure_custodian, ensure_len, get_pending_request,
    RequestReceipt,
};
use crate::{
    context::CallContext,
    controller,
    error::{AuthError, BridgeError, BridgeResult, ValidationError},
    output::ExecOutput,
};

/// Records a broker's claim that it deposited `amount` of the asset in
/// foreign transaction `txid` to `deposit_address`.
///
/// The deposit address must be exactly the one the custodian assigned to the
/// sender.
pub fn add_mint_request(
    state: &mut impl StateAccessor,
    ctx: &CallContext,
    out: &mut ExecOutput,
    amount: u64,
    txid: String,
    deposit_address: String,
) -> BridgeResult<RequestReceipt> {
    ensure_broker(state, ctx)?;
    if amount == 0 {
        return Err(ValidationError::ZeroAmount.into());
    }
    ensure_len("txid", &txid)?;
    if deposit_address.is_empty() {
        return Err(ValidationError::EmptyDepositAddress.into());
    }
    if state.custodian_deposit_address(ctx.sender()) != Some(deposit_address.as_str()) {
        return Err(ValidationError::DepositAddressMismatch.into());
    }

    let (req, receipt) = append_pending_request(
        state,
        RequestKind::Mint,
        *ctx.sender(),
        amount,
        deposit_address,
        txid,
        ctx.timestamp(),
    );

    debug!(nonce = receipt.nonce, hash = %receipt.request_hash, amount, "mint request added");
    out.emit_log(RequestLog::from_request(
        RequestAction::Added,
        RequestKind::Mint,
        &req,
        receipt.request_hash,
    ));
    Ok(receipt)
}

/// Withdraws a pending mint request. Only its requester may do this, and only
/// while still a broker.
pub fn cancel_mint_request(
    state: &mut impl StateAccessor,
    ctx: &CallContext,
    out: &mut ExecOutput,
    request_hash: RequestHash,
) -> BridgeResult<()> {
    ensure_broker(state, ctx)?;
    let mut req = get_pending_request(state, RequestKind::Mint, &request_hash)?;
    if req.requester() != ctx.sender() {
        return Err(AuthError::NotRequester(*ctx.sender()).into());
    }

    req.set_status(RequestStatus::Canceled);
    state.update_request(RequestKind::Mint, req.clone());

    debug!(nonce = req.nonce(), hash = %request_hash, "mint request canceled");
    out.emit_log(RequestLog::from_request(
        RequestAction::Canceled,
        RequestKind::Mint,
        &req,
        request_hash,
    ));
    Ok(())
}

/// Approves a pending mint request and mints the tokens to the requester.
///
/// If the controller refuses the mint the error is returned as a dependency
/// failure and the caller must discard every write, status included.
pub fn confirm_mint_request(
    state: &mut impl StateAccessor,
    ctx: &CallContext,
    out: &mut ExecOutput,
    request_hash: RequestHash,
) -> BridgeResult<()> {
    ensure_custodian(state, ctx)?;
    let mut req = get_pending_request(state, RequestKind::Mint, &request_hash)?;

    req.set_status(RequestStatus::Approved);
    state.update_request(RequestKind::Mint, req.clone());

    let bridge = *state.factory_address();
    controller::mint(state, out, &bridge, req.requester(), req.amount())
        .map_err(BridgeError::dependency)?;

    debug!(nonce = req.nonce(), hash = %request_hash, amount = req.amount(), "mint confirmed");
    out.emit_log(RequestLog::from_request(
        RequestAction::Confirmed,
        RequestKind::Mint,
        &req,
        request_hash,
    ));
    Ok(())
}

pub fn reject_mint_request(
    state: &mut impl StateAccessor,
    ctx: &CallContext,
    out: &mut ExecOutput,
    request_hash: RequestHash,
) -> BridgeResult<()> {
    ensure_custodian(state, ctx)?;
    let mut req = get_pending_request(state, RequestKind::Mint, &request_hash)?;

    req.set_status(RequestStatus::Rejected);
    state.update_request(RequestKind::Mint, req.clone());

    debug!(nonce = req.nonce(), hash = %request_hash, "mint rejected");
    out.emit_log(RequestLog::from_request(
        RequestAction::Rejected,
        RequestKind::Mint,
        &req,
        request_hash,
    ));
    Ok(())
}
