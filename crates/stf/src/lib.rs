//! Custody bridge state transition logic.
//!
//! ## Architecture
//!
//! - `members`: role registry (custodian, brokers)
//! - `token`: wrapped fungible token primitive
//! - `controller`: supply controller, the only path to mint and burn
//! - `factory`: bridge protocol, deposit bindings and request ledgers
//! - `queries`: read accessors
//! - `call`/`stf`: call envelope and atomic execution over a write batch

pub mod call;
pub mod context;
pub mod controller;
pub mod error;
pub mod factory;
pub mod members;
pub mod output;
pub mod queries;
mod stf;
pub mod token;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

#[cfg(test)]
mod tests;

pub use call::{execute_call, BridgeCall, CallReturn};
pub use context::CallContext;
pub use error::{
    AuthError, BridgeError, BridgeResult, ErrorKind, StateError, TokenError, ValidationError,
};
pub use output::ExecOutput;
pub use stf::*;
