use crate::macros::internal::impl_buf_common;

/// A 20-byte buffer.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Buf20(pub [u8; 20]);

impl_buf_common!(Buf20, 20);

/// A 32-byte buffer.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Buf32(pub [u8; 32]);

impl_buf_common!(Buf32, 32);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseBufError;

    #[test]
    fn test_buf32_parse_with_and_without_prefix() {
        let hex_str = "aa".repeat(32);
        let plain: Buf32 = hex_str.parse().unwrap();
        let prefixed: Buf32 = format!("0x{hex_str}").parse().unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(plain, Buf32::new([0xaa; 32]));
    }

    #[test]
    fn test_buf20_parse_wrong_length() {
        let err = "abcd".parse::<Buf20>().unwrap_err();
        assert_eq!(
            err,
            ParseBufError::InvalidLength {
                expected: 20,
                got: 2
            }
        );
    }

    #[test]
    fn test_buf20_parse_bad_hex() {
        let res = "zz".repeat(20).parse::<Buf20>();
        assert!(matches!(res, Err(ParseBufError::InvalidHex(_))));
    }

    #[test]
    fn test_is_zero() {
        assert!(Buf32::zero().is_zero());
        let mut raw = [0u8; 32];
        raw[31] = 1;
        assert!(!Buf32::new(raw).is_zero());
    }

    #[test]
    fn test_fmt() {
        let mut raw = [0u8; 20];
        raw[0] = 0x12;
        raw[19] = 0xef;
        let buf = Buf20::new(raw);
        assert_eq!(format!("{buf:?}"), format!("12{}ef", "00".repeat(18)));
        assert_eq!(format!("{buf}"), "120000..0000ef");
    }

    #[test]
    fn test_serde_json_hex() {
        let buf = Buf20::new([7u8; 20]);
        let json = serde_json::to_string(&buf).unwrap();
        assert_eq!(json, format!("\"{}\"", "07".repeat(20)));

        let decoded: Buf20 = serde_json::from_str(&format!("\"0x{}\"", "07".repeat(20))).unwrap();
        assert_eq!(decoded, buf);
    }

    #[test]
    fn test_borsh_is_raw_bytes() {
        let buf = Buf32::new([3u8; 32]);
        let encoded = borsh::to_vec(&buf).unwrap();
        assert_eq!(encoded, vec![3u8; 32]);
        let decoded: Buf32 = borsh::from_slice(&encoded).unwrap();
        assert_eq!(decoded, buf);
    }
}
