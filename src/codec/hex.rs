//! # Hex Encoding
//!
//! Printer payloads travel over text-only channels (method channels, JSON,
//! serial consoles) as hex strings: two characters per byte, in buffer order.
//!
//! ```
//! use bluberry::codec::hex::{from_hex, to_hex, HexCase};
//!
//! let hex = to_hex(&[0x1D, 0x76, 0x30, 0x00], HexCase::Upper);
//! assert_eq!(hex, "1D763000");
//! assert_eq!(from_hex(&hex).unwrap(), vec![0x1D, 0x76, 0x30, 0x00]);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{BluberryError, Result};

/// Letter case for hex digits `a`-`f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HexCase {
    #[default]
    Upper,
    Lower,
}

/// Encode bytes as hex. Total over any input; output is `2 * bytes.len()` chars.
pub fn to_hex(bytes: &[u8], case: HexCase) -> String {
    match case {
        HexCase::Upper => hex::encode_upper(bytes),
        HexCase::Lower => hex::encode(bytes),
    }
}

/// Decode a hex string produced by [`to_hex`] (either case).
///
/// ASCII whitespace is ignored so wrapped or spaced dumps decode too.
pub fn from_hex(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    hex::decode(&compact).map_err(|e| BluberryError::Format(format!("Invalid hex payload: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(to_hex(&[], HexCase::Upper), "");
        assert_eq!(from_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_case_is_fixed() {
        let bytes = [0xAB, 0xCD, 0xEF, 0x01];
        assert_eq!(to_hex(&bytes, HexCase::Upper), "ABCDEF01");
        assert_eq!(to_hex(&bytes, HexCase::Lower), "abcdef01");
    }

    #[test]
    fn test_length_is_twice_input() {
        let bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(to_hex(&bytes, HexCase::Lower).len(), 512);
    }

    #[test]
    fn test_round_trip_all_byte_values() {
        let bytes: Vec<u8> = (0..=255).collect();
        for case in [HexCase::Upper, HexCase::Lower] {
            assert_eq!(from_hex(&to_hex(&bytes, case)).unwrap(), bytes);
        }
    }

    #[test]
    fn test_decode_ignores_whitespace() {
        assert_eq!(from_hex("1b 40\n0a").unwrap(), vec![0x1B, 0x40, 0x0A]);
    }

    #[test]
    fn test_decode_rejects_odd_length() {
        assert!(matches!(from_hex("ABC"), Err(BluberryError::Format(_))));
    }

    #[test]
    fn test_decode_rejects_non_hex() {
        assert!(matches!(from_hex("ZZ"), Err(BluberryError::Format(_))));
    }
}
