//! Durable host for the bridge state machine.
//!
//! The host owns the in-memory [`BridgeState`](custody_state::BridgeState)
//! and a [`BridgeDatabase`](custody_db_types::BridgeDatabase). Each call runs
//! against a write-tracking layer, is committed to the database together with
//! its logs, and only then folded into memory. A failed call touches neither.

mod errors;
mod host;

pub use errors::{HostError, HostResult};
pub use host::{BridgeHost, SubmitOutcome};
