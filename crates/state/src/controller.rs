//! Supply controller state.

use borsh::{BorshDeserialize, BorshSerialize};
use custody_primitives::Address;
use serde::{Deserialize, Serialize};

/// Identities the controller works with.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct ControllerState {
    /// The controller's own address. Owns the token and holds tokens in
    /// custody while they are burned.
    address: Address,

    owner: Address,

    /// Only this identity may mint or burn through the controller.
    bridge: Address,

    /// Address of the wrapped token.
    token: Address,
}

impl ControllerState {
    pub fn new(address: Address, owner: Address, bridge: Address, token: Address) -> Self {
        Self {
            address,
            owner,
            bridge,
            token,
        }
    }

    pub const fn address(&self) -> &Address {
        &self.address
    }

    pub const fn owner(&self) -> &Address {
        &self.owner
    }

    pub const fn bridge(&self) -> &Address {
        &self.bridge
    }

    pub const fn token(&self) -> &Address {
        &self.token
    }

    pub fn set_bridge(&mut self, bridge: Address) {
        self.bridge = bridge;
    }
}
