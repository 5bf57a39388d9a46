//! Per-call context.

use custody_primitives::Address;
use serde::{Deserialize, Serialize};

/// Who is calling and when.
///
/// The timestamp is supplied by the host and is only recorded, never used to
/// gate a transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    sender: Address,
    timestamp: u64,
}

impl CallContext {
    pub fn new(sender: Address, timestamp: u64) -> Self {
        Self { sender, timestamp }
    }

    pub fn sender(&self) -> &Address {
        &self.sender
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}
