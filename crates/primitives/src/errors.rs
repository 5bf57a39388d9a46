use thiserror::Error;

/// Error parsing a fixed-size buffer from its hex representation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseBufError {
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
}
