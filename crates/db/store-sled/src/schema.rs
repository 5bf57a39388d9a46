//! Typed table definitions layered over raw sled trees.

use std::fmt::Debug;

use borsh::{BorshDeserialize, BorshSerialize};
use custody_bridge_types::RequestHash;
use custody_primitives::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    /// Unable to decode a key because it has a different length than expected.
    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("failed to (de)serialize {schema}: {source}")]
    Serialization {
        schema: &'static str,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) type CodecResult<T> = Result<T, CodecError>;

/// A sled tree with fixed key and value types.
pub(crate) trait Schema: Debug + Send + Sync + Sized {
    const TREE_NAME: &'static str;

    type Key: KeyCodec;
    type Value: ValueCodec<Self>;
}

/// Keys must encode so that byte order matches the logical order.
pub(crate) trait KeyCodec: Sized {
    fn encode_key(&self) -> CodecResult<Vec<u8>>;
    fn decode_key(buf: &[u8]) -> CodecResult<Self>;
}

pub(crate) trait ValueCodec<S: Schema>: Sized {
    fn encode_value(&self) -> CodecResult<Vec<u8>>;
    fn decode_value(buf: &[u8]) -> CodecResult<Self>;
}

impl KeyCodec for u64 {
    fn encode_key(&self) -> CodecResult<Vec<u8>> {
        Ok(self.to_be_bytes().to_vec())
    }

    fn decode_key(buf: &[u8]) -> CodecResult<Self> {
        let arr: [u8; 8] = buf.try_into().map_err(|_| CodecError::InvalidLength {
            expected: 8,
            got: buf.len(),
        })?;
        Ok(u64::from_be_bytes(arr))
    }
}

/// Singleton tables hold one row under a fixed key.
impl KeyCodec for () {
    fn encode_key(&self) -> CodecResult<Vec<u8>> {
        Ok(vec![0])
    }

    fn decode_key(buf: &[u8]) -> CodecResult<Self> {
        if buf.len() != 1 {
            return Err(CodecError::InvalidLength {
                expected: 1,
                got: buf.len(),
            });
        }
        Ok(())
    }
}

macro_rules! impl_fixed_borsh_key {
    ($ty:ty, $len:expr) => {
        impl KeyCodec for $ty {
            fn encode_key(&self) -> CodecResult<Vec<u8>> {
                borsh::to_vec(self).map_err(|source| CodecError::Serialization {
                    schema: stringify!($ty),
                    source,
                })
            }

            fn decode_key(buf: &[u8]) -> CodecResult<Self> {
                if buf.len() != $len {
                    return Err(CodecError::InvalidLength {
                        expected: $len,
                        got: buf.len(),
                    });
                }
                BorshDeserialize::try_from_slice(buf).map_err(|source| {
                    CodecError::Serialization {
                        schema: stringify!($ty),
                        source,
                    }
                })
            }
        }
    };
}

// Fixed-width byte arrays, so borsh output is the raw bytes.
impl_fixed_borsh_key!(Address, 20);
impl_fixed_borsh_key!((Address, Address), 40);
impl_fixed_borsh_key!(RequestHash, 32);

/// Values are borsh encoded.
impl<S, T> ValueCodec<S> for T
where
    S: Schema,
    T: BorshSerialize + BorshDeserialize,
{
    fn encode_value(&self) -> CodecResult<Vec<u8>> {
        borsh::to_vec(self).map_err(|source| CodecError::Serialization {
            schema: S::TREE_NAME,
            source,
        })
    }

    fn decode_value(buf: &[u8]) -> CodecResult<Self> {
        BorshDeserialize::try_from_slice(buf).map_err(|source| CodecError::Serialization {
            schema: S::TREE_NAME,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u64_keys_sort_numerically() {
        let a = 255u64.encode_key().unwrap();
        let b = 256u64.encode_key().unwrap();
        assert!(a < b);
        assert_eq!(u64::decode_key(&b).unwrap(), 256);
    }

    #[test]
    fn test_key_length_checked() {
        assert!(matches!(
            u64::decode_key(&[0; 3]),
            Err(CodecError::InvalidLength {
                expected: 8,
                got: 3
            })
        ));
        assert!(Address::decode_key(&[0; 19]).is_err());
    }

    #[test]
    fn test_pair_key() {
        let key = (Address::repeat_byte(1), Address::repeat_byte(2));
        let enc = key.encode_key().unwrap();
        assert_eq!(enc.len(), 40);
        assert_eq!(<(Address, Address)>::decode_key(&enc).unwrap(), key);
    }
}
