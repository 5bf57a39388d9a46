//! Principal identifiers.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::buf::Buf20;

/// Identity of a principal on the host ledger (owner, custodian, broker,
/// controller, bridge or plain token holder).
///
/// The all-zero address is reserved and never denotes a valid principal.
#[derive(
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Address(Buf20);

impl_buf_wrapper!(Address, Buf20, 20);

impl Address {
    /// Constructs an address whose bytes are all `b`. Handy for fixtures.
    pub const fn repeat_byte(b: u8) -> Self {
        Self::new([b; 20])
    }
}
