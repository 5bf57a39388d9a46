//! Subcommand handlers.

pub(crate) mod genesis;
pub(crate) mod logs;
pub(crate) mod members;
pub(crate) mod requests;
pub(crate) mod submit;

use custody_bridge_worker::{BridgeHost, HostError};
use custody_cli_common::errors::{DisplayableError, DisplayedError};
use custody_db_store_sled::BridgeDBSled;
use custody_state::BridgeState;

pub(crate) type SledHost = BridgeHost<BridgeDBSled>;

/// Runs `f` against the current state, mapping a missing genesis to a user
/// error.
pub(crate) fn read_state<R>(
    host: &SledHost,
    f: impl FnOnce(&BridgeState) -> R,
) -> Result<R, DisplayedError> {
    match host.with_state(f) {
        Err(HostError::NotInitialized) => Err(DisplayedError::user(
            "bridge is not initialized, run init-genesis first",
            HostError::NotInitialized,
        )),
        res => res.internal_error("Failed to read bridge state"),
    }
}
