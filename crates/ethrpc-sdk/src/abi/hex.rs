//! Hex and word-level helpers

use ethrpc_primitives::U256;

use crate::SdkError;

/// Width of one ABI word in hex digits
pub const WORD_HEX_LEN: usize = 64;

/// Big-endian bytes of `value` without leading zeros; empty for zero
pub fn encode_minimal_bytes(value: &U256) -> Vec<u8> {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(32);
    bytes[start..].to_vec()
}

/// Lowercase hex, no prefix
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Parse hex with or without `0x`
pub fn from_hex(s: &str) -> Result<Vec<u8>, SdkError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    Ok(hex::decode(s)?)
}

/// Left-pad hex digits with `'0'` to a full word.
///
/// Content longer than a word is rejected rather than truncated.
pub fn pad_hex_word(digits: &str) -> Result<String, SdkError> {
    if digits.len() > WORD_HEX_LEN {
        return Err(SdkError::WordOverflow(digits.len()));
    }
    Ok(format!("{:0>64}", digits))
}

/// Hex-encode `bytes` and left-pad to a full word
pub fn pad_bytes_word(bytes: &[u8]) -> Result<String, SdkError> {
    pad_hex_word(&to_hex(bytes))
}

/// Word holding `value`
pub fn u256_word(value: &U256) -> String {
    // 32 minimal bytes never exceed a word
    format!("{:0>64}", to_hex(&encode_minimal_bytes(value)))
}

/// Check that every character is a hex digit
pub(crate) fn ensure_hex_digits(s: &str) -> Result<(), SdkError> {
    match s.chars().find(|c| !c.is_ascii_hexdigit()) {
        Some(c) => Err(SdkError::InvalidHex(format!("unexpected character '{}'", c))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_minimal_bytes() {
        assert!(encode_minimal_bytes(&U256::zero()).is_empty());
        assert_eq!(encode_minimal_bytes(&U256::from(5)), vec![5]);
        assert_eq!(encode_minimal_bytes(&U256::from(256)), vec![1, 0]);
        assert_eq!(encode_minimal_bytes(&U256::from(0x1234_56u64)), vec![0x12, 0x34, 0x56]);
        assert_eq!(encode_minimal_bytes(&U256::MAX), vec![0xff; 32]);
    }

    #[test]
    fn test_pad_hex_word() {
        let word = pad_hex_word("5").unwrap();
        assert_eq!(word.len(), 64);
        assert_eq!(word, format!("{}5", "0".repeat(63)));
        assert_eq!(pad_hex_word("").unwrap(), "0".repeat(64));
    }

    #[test]
    fn test_pad_hex_word_overflow() {
        let too_long = "f".repeat(65);
        assert!(matches!(pad_hex_word(&too_long), Err(SdkError::WordOverflow(65))));
        assert!(pad_hex_word(&"f".repeat(64)).is_ok());
    }

    #[test]
    fn test_pad_bytes_word() {
        assert_eq!(pad_bytes_word(&[0x0a]).unwrap(), format!("{}0a", "0".repeat(62)));
    }

    #[test]
    fn test_u256_word() {
        assert_eq!(u256_word(&U256::zero()), "0".repeat(64));
        assert_eq!(u256_word(&U256::MAX), "f".repeat(64));
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(from_hex("0x0102").unwrap(), vec![1, 2]);
        assert_eq!(from_hex("0102").unwrap(), vec![1, 2]);
        assert!(from_hex("0xzz").is_err());
    }
}
