//! Bridge protocol: deposit address bindings and the mint and burn request
//! ledgers.
//!
//! Every transition looks a request up by hash and only proceeds if the
//! request is still pending and the hash recomputed from its stored fields
//! equals the presented one. The bridge acts toward the controller and token
//! as its own factory address.

mod bindings;
mod burn;
mod mint;

pub use bindings::{set_broker_deposit_address, set_custodian_deposit_address};
pub use burn::{burn, confirm_burn_request};
pub use mint::{
    add_mint_request, cancel_mint_request, confirm_mint_request, reject_mint_request,
};

use custody_bridge_types::{Request, RequestHash, RequestKind, MAX_REQUEST_STRING_LEN};
use custody_primitives::Address;
use custody_state::StateAccessor;

use crate::{
    context::CallContext,
    error::{AuthError, BridgeResult, StateError, ValidationError},
};

/// Identifies a newly created request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RequestReceipt {
    pub nonce: u64,
    pub request_hash: RequestHash,
}

fn ensure_custodian(state: &impl StateAccessor, ctx: &CallContext) -> BridgeResult<()> {
    if !state.members().is_custodian(ctx.sender()) {
        return Err(AuthError::NotCustodian(*ctx.sender()).into());
    }
    Ok(())
}

fn ensure_broker(state: &impl StateAccessor, ctx: &CallContext) -> BridgeResult<()> {
    if !state.members().is_broker(ctx.sender()) {
        return Err(AuthError::NotBroker(*ctx.sender()).into());
    }
    Ok(())
}

fn ensure_len(field: &'static str, value: &str) -> BridgeResult<()> {
    if value.len() > MAX_REQUEST_STRING_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_REQUEST_STRING_LEN,
        }
        .into());
    }
    Ok(())
}

/// Resolves `hash` to a pending request, returning a copy of it.
fn get_pending_request(
    state: &impl StateAccessor,
    kind: RequestKind,
    hash: &RequestHash,
) -> BridgeResult<Request> {
    if hash.is_zero() {
        return Err(ValidationError::ZeroRequestHash.into());
    }

    let req = state
        .request_nonce_by_hash(kind, hash)
        .and_then(|nonce| state.get_request(kind, nonce))
        .ok_or(StateError::RequestNotFound)?;

    if !req.status().is_pending() {
        return Err(StateError::NotPending {
            nonce: req.nonce(),
            status: req.status(),
        }
        .into());
    }
    if req.compute_hash() != *hash {
        return Err(StateError::HashMismatch.into());
    }

    Ok(req.clone())
}

/// Appends a fresh pending request to a ledger and indexes its hash.
fn append_pending_request(
    state: &mut impl StateAccessor,
    kind: RequestKind,
    requester: Address,
    amount: u64,
    deposit_address: String,
    txid: String,
    timestamp: u64,
) -> (Request, RequestReceipt) {
    let nonce = state.request_count(kind);
    let req = Request::new_pending(requester, amount, deposit_address, txid, nonce, timestamp);
    let request_hash = req.compute_hash();

    state.append_request(kind, req.clone());
    state.index_request_hash(kind, request_hash, nonce);

    (
        req,
        RequestReceipt {
            nonce,
            request_hash,
        },
    )
}
