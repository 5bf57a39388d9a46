//! Bridge state: role registry, supply controller, wrapped token and the two
//! request ledgers, plus the copy-on-write layer calls execute against.

pub mod accessor;
pub mod bridge_state;
pub mod controller;
pub mod genesis;
pub mod ledger;
pub mod members;
pub mod token;
pub mod write_batch;
pub mod write_tracking;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use accessor::StateAccessor;
pub use bridge_state::BridgeState;
pub use controller::ControllerState;
pub use genesis::{GenesisError, GenesisParams, TokenMetadata};
pub use ledger::RequestLedger;
pub use members::MembersState;
pub use token::TokenState;
pub use write_batch::{LedgerDelta, WriteBatch};
pub use write_tracking::WriteTrackingState;
