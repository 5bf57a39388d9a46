//! Read-only accessors over bridge state.

use custody_bridge_types::{Request, RequestHash, RequestKind};
use custody_primitives::Address;
use custody_state::StateAccessor;
use serde::{Deserialize, Serialize};

/// A request as exposed to readers: every stored field, the status as a
/// string and the hash recomputed from the current content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestView {
    pub kind: RequestKind,
    pub nonce: u64,
    pub requester: Address,
    pub amount: u64,
    pub deposit_address: String,
    pub txid: String,
    pub timestamp: u64,
    pub status: String,
    pub request_hash: RequestHash,
}

impl RequestView {
    pub fn from_request(kind: RequestKind, req: &Request) -> Self {
        Self {
            kind,
            nonce: req.nonce(),
            requester: *req.requester(),
            amount: req.amount(),
            deposit_address: req.deposit_address().to_owned(),
            txid: req.txid().to_owned(),
            timestamp: req.timestamp(),
            status: req.status().as_str().to_owned(),
            request_hash: req.compute_hash(),
        }
    }
}

pub fn get_mint_request(state: &impl StateAccessor, nonce: u64) -> Option<RequestView> {
    get_request(state, RequestKind::Mint, nonce)
}

pub fn get_burn_request(state: &impl StateAccessor, nonce: u64) -> Option<RequestView> {
    get_request(state, RequestKind::Burn, nonce)
}

pub fn get_request(
    state: &impl StateAccessor,
    kind: RequestKind,
    nonce: u64,
) -> Option<RequestView> {
    state
        .get_request(kind, nonce)
        .map(|req| RequestView::from_request(kind, req))
}

pub fn get_mint_requests_length(state: &impl StateAccessor) -> u64 {
    state.request_count(RequestKind::Mint)
}

pub fn get_burn_requests_length(state: &impl StateAccessor) -> u64 {
    state.request_count(RequestKind::Burn)
}

/// Nonce a hash is indexed at. Stale hashes of confirmed burns still resolve
/// here even though their request's current hash differs.
pub fn get_request_nonce(
    state: &impl StateAccessor,
    kind: RequestKind,
    hash: &RequestHash,
) -> Option<u64> {
    state.request_nonce_by_hash(kind, hash)
}

pub fn custodian_deposit_address(state: &impl StateAccessor, broker: &Address) -> Option<String> {
    state.custodian_deposit_address(broker).map(str::to_owned)
}

pub fn broker_deposit_address(state: &impl StateAccessor, broker: &Address) -> Option<String> {
    state.broker_deposit_address(broker).map(str::to_owned)
}

/// Snapshot of the role registry and controller identities.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembersView {
    pub owner: Address,
    pub custodian: Option<Address>,
    pub brokers: Vec<Address>,
    pub controller: Address,
    pub bridge: Address,
    pub token: Address,
    pub paused: bool,
}

pub fn get_members(state: &impl StateAccessor) -> MembersView {
    let members = state.members();
    let custodian = *members.custodian();
    MembersView {
        owner: *members.owner(),
        custodian: (!custodian.is_zero()).then_some(custodian),
        brokers: members.brokers().to_vec(),
        controller: *state.controller().address(),
        bridge: *state.controller().bridge(),
        token: *state.controller().token(),
        paused: state.token().paused(),
    }
}
