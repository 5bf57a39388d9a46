//! Hashing helpers.

use sha2::{Digest, Sha256};

use crate::buf::Buf32;

/// Direct untagged hash.
pub fn raw(buf: &[u8]) -> Buf32 {
    Buf32::new(Sha256::digest(buf).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_matches_known_vector() {
        // sha256("abc")
        let expected: Buf32 = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
            .parse()
            .unwrap();
        assert_eq!(raw(b"abc"), expected);
    }
}
