//! Burn request lifecycle.
//!
//! Burning is pessimistic: tokens leave the broker and supply shrinks when the
//! request is created. Confirmation only records the foreign settlement txid.
//! Nothing returns the tokens if the custodian never confirms.

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
    error::{BridgeError, BridgeResult, ValidationError},
    output::ExecOutput,
    token,
};

/// Burns `amount` of the sender's tokens and opens a burn request toward the
/// sender's registered burn destination.
///
/// The sender must have approved the bridge address for at least `amount`.
pub fn burn(
    state: &mut impl StateAccessor,
    ctx: &CallContext,
    out: &mut ExecOutput,
    amount: u64,
) -> BridgeResult<RequestReceipt> {
    ensure_broker(state, ctx)?;
    if amount == 0 {
        return Err(ValidationError::ZeroAmount.into());
    }
    let broker = *ctx.sender();
    let deposit_address = match state.broker_deposit_address(&broker) {
        Some(addr) if !addr.is_empty() => addr.to_owned(),
        _ => return Err(ValidationError::BrokerDepositAddressNotSet(broker).into()),
    };

    let (req, receipt) = append_pending_request(
        state,
        RequestKind::Burn,
        broker,
        amount,
        deposit_address,
        String::new(),
        ctx.timestamp(),
    );

    let bridge = *state.factory_address();
    let custody = *state.controller().address();
    token::transfer_from(state, out, &bridge, &broker, &custody, amount)
        .map_err(BridgeError::dependency)?;
    controller::burn(state, out, &bridge, amount).map_err(BridgeError::dependency)?;

    debug!(nonce = receipt.nonce, hash = %receipt.request_hash, amount, %broker, "burned");
    out.emit_log(RequestLog::from_request(
        RequestAction::Added,
        RequestKind::Burn,
        &req,
        receipt.request_hash,
    ));
    Ok(receipt)
}

/// Records the foreign settlement of a burn and approves it.
///
/// Setting the txid changes the request's content hash. The new hash is
/// indexed at the same nonce, the old entry stays but no longer matches a
/// pending request. The emitted log carries the hash the caller presented.
pub fn confirm_burn_request(
    state: &mut impl StateAccessor,
    ctx: &CallContext,
    out: &mut ExecOutput,
    request_hash: RequestHash,
    txid: String,
) -> BridgeResult<()> {
    ensure_custodian(state, ctx)?;
    if txid.is_empty() {
        return Err(ValidationError::EmptyTxid.into());
    }
    ensure_len("txid", &txid)?;
    let mut req = get_pending_request(state, RequestKind::Burn, &request_hash)?;

    req.set_txid(txid);
    req.set_status(RequestStatus::Approved);
    let new_hash = req.compute_hash();
    state.update_request(RequestKind::Burn, req.clone());
    state.index_request_hash(RequestKind::Burn, new_hash, req.nonce());

    debug!(nonce = req.nonce(), hash = %request_hash, %new_hash, "burn confirmed");
    out.emit_log(RequestLog::from_request(
        RequestAction::Confirmed,
        RequestKind::Burn,
        &req,
        request_hash,
    ));
    Ok(())
}
