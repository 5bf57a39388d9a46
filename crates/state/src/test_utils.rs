//! Fixtures for building bridge state in tests.

use custody_primitives::Address;

use crate::{
    bridge_state::BridgeState,
    genesis::{GenesisParams, TokenMetadata},
};

pub fn owner() -> Address {
    Address::repeat_byte(0x01)
}

pub fn controller() -> Address {
    Address::repeat_byte(0x02)
}

pub fn bridge() -> Address {
    Address::repeat_byte(0x03)
}

pub fn token() -> Address {
    Address::repeat_byte(0x04)
}

pub fn custodian() -> Address {
    Address::repeat_byte(0x05)
}

/// The `i`th genesis broker. Genesis registers brokers 0 and 1.
pub fn broker(i: u8) -> Address {
    Address::repeat_byte(0x10 + i)
}

/// An address with no role.
pub fn outsider() -> Address {
    Address::repeat_byte(0xee)
}

pub fn genesis_params() -> GenesisParams {
    GenesisParams {
        owner: owner(),
        controller: controller(),
        bridge: bridge(),
        custodian: Some(custodian()),
        brokers: vec![broker(0), broker(1)],
        token: TokenMetadata {
            address: token(),
            name: "Wrapped Asset".to_owned(),
            symbol: "WAST".to_owned(),
            decimals: 8,
        },
    }
}

pub fn genesis_state() -> BridgeState {
    match genesis_params().build_state() {
        Ok(state) => state,
        Err(e) => panic!("fixture genesis is valid: {e}"),
    }
}
