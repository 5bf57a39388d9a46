//! Collection of generic data types that are used widely across the bridge.

#[macro_use]
mod macros;

pub mod address;
pub mod buf;
pub mod errors;
pub mod hash;

pub use address::Address;
pub use buf::{Buf20, Buf32};
pub use errors::ParseBufError;
