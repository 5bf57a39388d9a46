//! Genesis parameters and initial state construction.

use custody_primitives::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    bridge_state::BridgeState, controller::ControllerState, members::MembersState,
    token::TokenState,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Everything needed to build the initial bridge state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisParams {
    /// Owner of both the role registry and the controller.
    pub owner: Address,

    pub controller: Address,

    /// Address the bridge protocol acts as. Registered as the controller's
    /// bridge authority.
    pub bridge: Address,

    #[serde(default)]
    pub custodian: Option<Address>,

    #[serde(default)]
    pub brokers: Vec<Address>,

    pub token: TokenMetadata,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenesisError {
    #[error("genesis: zero address for {0}")]
    ZeroAddress(&'static str),

    #[error("genesis: duplicate broker {0:?}")]
    DuplicateBroker(Address),
}

impl GenesisParams {
    /// Validates the parameters and builds the initial state.
    pub fn build_state(&self) -> Result<BridgeState, GenesisError> {
        check_nonzero(&self.owner, "owner")?;
        check_nonzero(&self.controller, "controller")?;
        check_nonzero(&self.bridge, "bridge")?;
        check_nonzero(&self.token.address, "token")?;

        let mut members = MembersState::new(self.owner);
        if let Some(custodian) = self.custodian {
            check_nonzero(&custodian, "custodian")?;
            members.set_custodian(custodian);
        }
        for broker in &self.brokers {
            check_nonzero(broker, "broker")?;
            if !members.insert_broker(*broker) {
                return Err(GenesisError::DuplicateBroker(*broker));
            }
        }

        let controller =
            ControllerState::new(self.controller, self.owner, self.bridge, self.token.address);
        let token = TokenState::new(
            self.token.address,
            self.controller,
            self.token.name.clone(),
            self.token.symbol.clone(),
            self.token.decimals,
        );

        Ok(BridgeState::new(self.bridge, members, controller, token))
    }
}

fn check_nonzero(addr: &Address, what: &'static str) -> Result<(), GenesisError> {
    if addr.is_zero() {
        return Err(GenesisError::ZeroAddress(what));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_utils::genesis_params, StateAccessor};

    #[test]
    fn test_build_state_wires_identities() {
        let params = genesis_params();
        let state = params.build_state().unwrap();
        assert_eq!(state.factory_address(), &params.bridge);
        assert_eq!(state.controller().bridge(), &params.bridge);
        assert_eq!(state.controller().token(), &params.token.address);
        assert_eq!(state.token().owner(), &params.controller);
        assert_eq!(state.members().broker_count(), params.brokers.len());
        assert_eq!(state.token().total_supply(), 0);
    }

    #[test]
    fn test_rejects_zero_and_duplicates() {
        let mut params = genesis_params();
        params.bridge = Address::zero();
        assert_eq!(
            params.build_state().unwrap_err(),
            GenesisError::ZeroAddress("bridge")
        );

        let mut params = genesis_params();
        params.brokers.push(params.brokers[0]);
        assert!(matches!(
            params.build_state(),
            Err(GenesisError::DuplicateBroker(_))
        ));
    }

    #[test]
    fn test_params_from_json() {
        let json = format!(
            r#"{{
                "owner": "{}",
                "controller": "{}",
                "bridge": "{}",
                "token": {{ "address": "{}", "name": "Wrapped", "symbol": "WRP", "decimals": 8 }}
            }}"#,
            "01".repeat(20),
            "02".repeat(20),
            "03".repeat(20),
            "04".repeat(20),
        );
        let params: GenesisParams = serde_json::from_str(&json).unwrap();
        assert!(params.custodian.is_none());
        assert!(params.brokers.is_empty());
        assert_eq!(params.token.decimals, 8);
    }
}
