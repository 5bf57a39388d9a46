//! Materialized bridge state.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use custody_bridge_types::{Request, RequestHash, RequestKind};
use custody_primitives::Address;

use crate::{
    accessor::StateAccessor, controller::ControllerState, ledger::RequestLedger,
    members::MembersState, token::TokenState,
};

/// The full bridge state held in memory by the host.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct BridgeState {
    factory_address: Address,
    members: MembersState,
    controller: ControllerState,
    token: TokenState,
    balances: BTreeMap<Address, u64>,
    allowances: BTreeMap<(Address, Address), u64>,
    custodian_deposit_addresses: BTreeMap<Address, String>,
    broker_deposit_addresses: BTreeMap<Address, String>,
    mint_requests: RequestLedger,
    burn_requests: RequestLedger,
}

impl BridgeState {
    /// Fresh state with empty tables.
    pub fn new(
        factory_address: Address,
        members: MembersState,
        controller: ControllerState,
        token: TokenState,
    ) -> Self {
        Self {
            factory_address,
            members,
            controller,
            token,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
            custodian_deposit_addresses: BTreeMap::new(),
            broker_deposit_addresses: BTreeMap::new(),
            mint_requests: RequestLedger::new(),
            burn_requests: RequestLedger::new(),
        }
    }

    /// Reassembles state loaded from storage.
    #[expect(clippy::too_many_arguments, reason = "one argument per persisted table")]
    pub fn from_parts(
        factory_address: Address,
        members: MembersState,
        controller: ControllerState,
        token: TokenState,
        balances: BTreeMap<Address, u64>,
        allowances: BTreeMap<(Address, Address), u64>,
        custodian_deposit_addresses: BTreeMap<Address, String>,
        broker_deposit_addresses: BTreeMap<Address, String>,
        mint_requests: RequestLedger,
        burn_requests: RequestLedger,
    ) -> Self {
        Self {
            factory_address,
            members,
            controller,
            token,
            balances,
            allowances,
            custodian_deposit_addresses,
            broker_deposit_addresses,
            mint_requests,
            burn_requests,
        }
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

    pub fn ledger(&self, kind: RequestKind) -> &RequestLedger {
        match kind {
            RequestKind::Mint => &self.mint_requests,
            RequestKind::Burn => &self.burn_requests,
        }
    }

    pub(crate) fn ledger_mut(&mut self, kind: RequestKind) -> &mut RequestLedger {
        match kind {
            RequestKind::Mint => &mut self.mint_requests,
            RequestKind::Burn => &mut self.burn_requests,
        }
    }
}

impl StateAccessor for BridgeState {
    fn factory_address(&self) -> &Address {
        &self.factory_address
    }

    fn members(&self) -> &MembersState {
        &self.members
    }

    fn members_mut(&mut self) -> &mut MembersState {
        &mut self.members
    }

    fn controller(&self) -> &ControllerState {
        &self.controller
    }

    fn controller_mut(&mut self) -> &mut ControllerState {
        &mut self.controller
    }

    fn token(&self) -> &TokenState {
        &self.token
    }

    fn token_mut(&mut self) -> &mut TokenState {
        &mut self.token
    }

    fn balance_of(&self, holder: &Address) -> u64 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    fn set_balance(&mut self, holder: Address, amount: u64) {
        self.balances.insert(holder, amount);
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> u64 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, amount: u64) {
        self.allowances.insert((owner, spender), amount);
    }

    fn custodian_deposit_address(&self, broker: &Address) -> Option<&str> {
        self.custodian_deposit_addresses
            .get(broker)
            .map(String::as_str)
    }

    fn set_custodian_deposit_address(&mut self, broker: Address, deposit_address: String) {
        self.custodian_deposit_addresses
            .insert(broker, deposit_address);
    }

    fn broker_deposit_address(&self, broker: &Address) -> Option<&str> {
        self.broker_deposit_addresses.get(broker).map(String::as_str)
    }

    fn set_broker_deposit_address(&mut self, broker: Address, deposit_address: String) {
        self.broker_deposit_addresses.insert(broker, deposit_address);
    }

    fn request_count(&self, kind: RequestKind) -> u64 {
        self.ledger(kind).len()
    }

    fn get_request(&self, kind: RequestKind, nonce: u64) -> Option<&Request> {
        self.ledger(kind).get(nonce)
    }

    fn append_request(&mut self, kind: RequestKind, req: Request) {
        self.ledger_mut(kind).push(req);
    }

    fn update_request(&mut self, kind: RequestKind, req: Request) {
        self.ledger_mut(kind).replace(req);
    }

    fn request_nonce_by_hash(&self, kind: RequestKind, hash: &RequestHash) -> Option<u64> {
        self.ledger(kind).nonce_by_hash(hash)
    }

    fn index_request_hash(&mut self, kind: RequestKind, hash: RequestHash, nonce: u64) {
        self.ledger_mut(kind).index_hash(hash, nonce);
    }
}
