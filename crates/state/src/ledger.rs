//! Append-only request arena with its hash side index.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use custody_bridge_types::{Request, RequestHash};
use serde::{Deserialize, Serialize};

/// Requests indexed by nonce, plus a hash to nonce index.
///
/// Entries are never removed from either. A request's nonce is its position.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct RequestLedger {
    requests: Vec<Request>,
    hash_index: BTreeMap<RequestHash, u64>,
}

impl RequestLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from persisted parts.
    pub fn from_parts(requests: Vec<Request>, hash_index: BTreeMap<RequestHash, u64>) -> Self {
        Self {
            requests,
            hash_index,
        }
    }

    pub fn len(&self) -> u64 {
        self.requests.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn get(&self, nonce: u64) -> Option<&Request> {
        self.requests.get(usize::try_from(nonce).ok()?)
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn nonce_by_hash(&self, hash: &RequestHash) -> Option<u64> {
        self.hash_index.get(hash).copied()
    }

    pub fn hash_index(&self) -> &BTreeMap<RequestHash, u64> {
        &self.hash_index
    }

    /// Appends a request. Its nonce must equal the current length.
    pub(crate) fn push(&mut self, req: Request) {
        debug_assert_eq!(req.nonce(), self.len(), "ledger: nonce gap");
        self.requests.push(req);
    }

    /// Replaces the request stored at `req.nonce()`, ignoring unknown nonces.
    pub(crate) fn replace(&mut self, req: Request) {
        if let Some(slot) = usize::try_from(req.nonce())
            .ok()
            .and_then(|i| self.requests.get_mut(i))
        {
            *slot = req;
        }
    }

    pub(crate) fn index_hash(&mut self, hash: RequestHash, nonce: u64) {
        self.hash_index.insert(hash, nonce);
    }
}
