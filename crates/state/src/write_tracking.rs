//! State layer that stores writes into a write batch.
//!
//! This provides a [`StateAccessor`] implementation that tracks all writes in
//! a [`WriteBatch`], allowing them to be applied atomically or discarded.

use std::fmt;

use custody_bridge_types::{Request, RequestHash, RequestKind};
use custody_primitives::Address;

use crate::{
    accessor::StateAccessor, controller::ControllerState, members::MembersState,
    token::TokenState, write_batch::WriteBatch,
};

/// A write-tracking state accessor that wraps a base state.
///
/// All reads check the write batch first, then fall back to the base state.
/// All writes are recorded in the write batch.
pub struct WriteTrackingState<'base, S: StateAccessor> {
    base: &'base S,
    batch: WriteBatch,
}

impl<S: StateAccessor + fmt::Debug> fmt::Debug for WriteTrackingState<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteTrackingState")
            .field("base", &self.base)
            .field("batch", &self.batch)
            .finish()
    }
}

impl<'base, S: StateAccessor> WriteTrackingState<'base, S> {
    pub fn new(base: &'base S) -> Self {
        Self {
            base,
            batch: WriteBatch::new(),
        }
    }

    /// Returns a reference to the underlying write batch.
    pub fn batch(&self) -> &WriteBatch {
        &self.batch
    }

    /// Consumes this wrapper and returns the write batch.
    pub fn into_batch(self) -> WriteBatch {
        self.batch
    }
}

impl<S: StateAccessor> StateAccessor for WriteTrackingState<'_, S> {
    fn factory_address(&self) -> &Address {
        self.base.factory_address()
    }

    // ===== Singletons, cloned into the batch on first write =====

    fn members(&self) -> &MembersState {
        self.batch
            .members
            .as_ref()
            .unwrap_or_else(|| self.base.members())
    }

    fn members_mut(&mut self) -> &mut MembersState {
        let base = self.base;
        self.batch
            .members
            .get_or_insert_with(|| base.members().clone())
    }

    fn controller(&self) -> &ControllerState {
        self.batch
            .controller
            .as_ref()
            .unwrap_or_else(|| self.base.controller())
    }

    fn controller_mut(&mut self) -> &mut ControllerState {
        let base = self.base;
        self.batch
            .controller
            .get_or_insert_with(|| base.controller().clone())
    }

    fn token(&self) -> &TokenState {
        self.batch
            .token
            .as_ref()
            .unwrap_or_else(|| self.base.token())
    }

    fn token_mut(&mut self) -> &mut TokenState {
        let base = self.base;
        self.batch
            .token
            .get_or_insert_with(|| base.token().clone())
    }

    // ===== Tables =====

    fn balance_of(&self, holder: &Address) -> u64 {
        match self.batch.balances.get(holder) {
            Some(amount) => *amount,
            None => self.base.balance_of(holder),
        }
    }

    fn set_balance(&mut self, holder: Address, amount: u64) {
        self.batch.balances.insert(holder, amount);
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> u64 {
        match self.batch.allowances.get(&(*owner, *spender)) {
            Some(amount) => *amount,
            None => self.base.allowance(owner, spender),
        }
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, amount: u64) {
        self.batch.allowances.insert((owner, spender), amount);
    }

    fn custodian_deposit_address(&self, broker: &Address) -> Option<&str> {
        match self.batch.custodian_deposit_addresses.get(broker) {
            Some(addr) => Some(addr.as_str()),
            None => self.base.custodian_deposit_address(broker),
        }
    }

    fn set_custodian_deposit_address(&mut self, broker: Address, deposit_address: String) {
        self.batch
            .custodian_deposit_addresses
            .insert(broker, deposit_address);
    }

    fn broker_deposit_address(&self, broker: &Address) -> Option<&str> {
        match self.batch.broker_deposit_addresses.get(broker) {
            Some(addr) => Some(addr.as_str()),
            None => self.base.broker_deposit_address(broker),
        }
    }

    fn set_broker_deposit_address(&mut self, broker: Address, deposit_address: String) {
        self.batch
            .broker_deposit_addresses
            .insert(broker, deposit_address);
    }

    // ===== Ledgers =====

    fn request_count(&self, kind: RequestKind) -> u64 {
        self.base.request_count(kind) + self.batch.ledger(kind).appended.len() as u64
    }

    fn get_request(&self, kind: RequestKind, nonce: u64) -> Option<&Request> {
        let base_len = self.base.request_count(kind);
        let delta = self.batch.ledger(kind);
        if nonce >= base_len {
            let idx = usize::try_from(nonce - base_len).ok()?;
            return delta.appended.get(idx);
        }
        delta
            .updated
            .get(&nonce)
            .or_else(|| self.base.get_request(kind, nonce))
    }

    fn append_request(&mut self, kind: RequestKind, req: Request) {
        debug_assert_eq!(req.nonce(), self.request_count(kind), "batch: nonce gap");
        self.batch.ledger_mut(kind).appended.push(req);
    }

    fn update_request(&mut self, kind: RequestKind, req: Request) {
        let base_len = self.base.request_count(kind);
        let nonce = req.nonce();
        let delta = self.batch.ledger_mut(kind);
        if nonce >= base_len {
            let slot = usize::try_from(nonce - base_len)
                .ok()
                .and_then(|i| delta.appended.get_mut(i));
            if let Some(slot) = slot {
                *slot = req;
            }
        } else {
            delta.updated.insert(nonce, req);
        }
    }

    fn request_nonce_by_hash(&self, kind: RequestKind, hash: &RequestHash) -> Option<u64> {
        match self.batch.ledger(kind).hash_index.get(hash) {
            Some(nonce) => Some(*nonce),
            None => self.base.request_nonce_by_hash(kind, hash),
        }
    }

    fn index_request_hash(&mut self, kind: RequestKind, hash: RequestHash, nonce: u64) {
        self.batch
            .ledger_mut(kind)
            .hash_index
            .insert(hash, nonce);
    }
}
