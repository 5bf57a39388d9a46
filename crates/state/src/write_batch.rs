//! Pending writes produced by executing one call.

use std::collections::BTreeMap;

use custody_bridge_types::{Request, RequestHash, RequestKind};
use custody_primitives::Address;

use crate::{
    bridge_state::BridgeState, controller::ControllerState, members::MembersState,
    token::TokenState, StateAccessor,
};

/// Changes to one request ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerDelta {
    /// Requests appended past the end of the base ledger, in nonce order.
    pub(crate) appended: Vec<Request>,

    /// Replacements for requests that already exist in the base ledger.
    pub(crate) updated: BTreeMap<u64, Request>,

    /// New hash index entries.
    pub(crate) hash_index: BTreeMap<RequestHash, u64>,
}

impl LedgerDelta {
    pub fn appended(&self) -> &[Request] {
        &self.appended
    }

    pub fn updated(&self) -> &BTreeMap<u64, Request> {
        &self.updated
    }

    pub fn hash_index(&self) -> &BTreeMap<RequestHash, u64> {
        &self.hash_index
    }

    /// Every request written, appended or updated.
    pub fn written_requests(&self) -> impl Iterator<Item = &Request> {
        self.updated.values().chain(self.appended.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.appended.is_empty() && self.updated.is_empty() && self.hash_index.is_empty()
    }

    fn apply_to(self, base: &mut BridgeState, kind: RequestKind) {
        let ledger = base.ledger_mut(kind);
        for (_, req) in self.updated {
            ledger.replace(req);
        }
        for req in self.appended {
            ledger.push(req);
        }
        for (hash, nonce) in self.hash_index {
            ledger.index_hash(hash, nonce);
        }
    }
}

/// Copy-on-write overlay for state modifications during call execution.
///
/// Singletons are cloned into the batch on first mutable access. Table
/// entries are recorded individually. Dropping a batch discards the call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    pub(crate) members: Option<MembersState>,
    pub(crate) controller: Option<ControllerState>,
    pub(crate) token: Option<TokenState>,
    pub(crate) balances: BTreeMap<Address, u64>,
    pub(crate) allowances: BTreeMap<(Address, Address), u64>,
    pub(crate) custodian_deposit_addresses: BTreeMap<Address, String>,
    pub(crate) broker_deposit_addresses: BTreeMap<Address, String>,
    pub(crate) mint: LedgerDelta,
    pub(crate) burn: LedgerDelta,
}

impl WriteBatch {
    /// Create a new empty WriteBatch
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> Option<&MembersState> {
        self.members.as_ref()
    }

    pub fn controller(&self) -> Option<&ControllerState> {
        self.controller.as_ref()
    }

    pub fn token(&self) -> Option<&TokenState> {
        self.token.as_ref()
    }

    pub fn balances(&self) -> &BTreeMap<Address, u64> {
        &self.balances
    }

    pub fn allowances(&self) -> &BTreeMap<(Address, Address), u64> {
        &self.allowances
    }

    pub fn custodian_deposit_addresses(&self) -> &BTreeMap<Address, String> {
        &self.custodian_deposit_addresses
    }

    pub fn broker_deposit_addresses(&self) -> &BTreeMap<Address, String> {
        &self.broker_deposit_addresses
    }

    pub fn ledger(&self, kind: RequestKind) -> &LedgerDelta {
        match kind {
            RequestKind::Mint => &self.mint,
            RequestKind::Burn => &self.burn,
        }
    }

    pub(crate) fn ledger_mut(&mut self, kind: RequestKind) -> &mut LedgerDelta {
        match kind {
            RequestKind::Mint => &mut self.mint,
            RequestKind::Burn => &mut self.burn,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_none()
            && self.controller.is_none()
            && self.token.is_none()
            && self.balances.is_empty()
            && self.allowances.is_empty()
            && self.custodian_deposit_addresses.is_empty()
            && self.broker_deposit_addresses.is_empty()
            && self.mint.is_empty()
            && self.burn.is_empty()
    }

    /// Folds every write into `base`.
    pub fn apply_to(self, base: &mut BridgeState) {
        if let Some(members) = self.members {
            *base.members_mut() = members;
        }
        if let Some(controller) = self.controller {
            *base.controller_mut() = controller;
        }
        if let Some(token) = self.token {
            *base.token_mut() = token;
        }
        for (holder, amount) in self.balances {
            base.set_balance(holder, amount);
        }
        for ((owner, spender), amount) in self.allowances {
            base.set_allowance(owner, spender, amount);
        }
        for (broker, addr) in self.custodian_deposit_addresses {
            base.set_custodian_deposit_address(broker, addr);
        }
        for (broker, addr) in self.broker_deposit_addresses {
            base.set_broker_deposit_address(broker, addr);
        }
        self.mint.apply_to(base, RequestKind::Mint);
        self.burn.apply_to(base, RequestKind::Burn);
    }
}
