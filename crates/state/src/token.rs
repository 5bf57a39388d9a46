//! Wrapped token supply record.
//!
//! Balances and allowances live in their own tables, this is only the
//! singleton part of the token.

use borsh::{BorshDeserialize, BorshSerialize};
use custody_primitives::Address;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct TokenState {
    address: Address,

    /// Only the owner may mint, burn and pause. This is the controller.
    owner: Address,

    name: String,
    symbol: String,
    decimals: u8,
    total_supply: u64,
    paused: bool,
}

impl TokenState {
    pub fn new(address: Address, owner: Address, name: String, symbol: String, decimals: u8) -> Self {
        Self {
            address,
            owner,
            name,
            symbol,
            decimals,
            total_supply: 0,
            paused: false,
        }
    }

    pub const fn address(&self) -> &Address {
        &self.address
    }

    pub const fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    pub const fn total_supply(&self) -> u64 {
        self.total_supply
    }

    pub fn set_total_supply(&mut self, total_supply: u64) {
        self.total_supply = total_supply;
    }

    pub const fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}
