//! Fixed-size byte types rendered as `0x`-prefixed hex

use std::fmt;
use std::str::FromStr;

use crate::PrimitiveError;

macro_rules! fixed_bytes {
    ($(#[$doc:meta])* $name:ident, $len:expr) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Size in bytes
            pub const LEN: usize = $len;

            /// All zero bytes
            pub const ZERO: $name = $name([0u8; $len]);

            /// Create from bytes
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                $name(bytes)
            }

            /// Create from a slice of exactly [`Self::LEN`] bytes
            pub fn from_slice(slice: &[u8]) -> Result<Self, PrimitiveError> {
                let bytes: [u8; $len] =
                    slice.try_into().map_err(|_| PrimitiveError::InvalidLength {
                        expected: $len,
                        got: slice.len(),
                    })?;
                Ok($name(bytes))
            }

            /// Parse hex, with or without `0x`
            pub fn from_hex(s: &str) -> Result<Self, PrimitiveError> {
                let s = s.strip_prefix("0x").unwrap_or(s);
                let bytes = hex::decode(s).map_err(|e| PrimitiveError::InvalidHex(e.to_string()))?;
                Self::from_slice(&bytes)
            }

            /// Get as bytes
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Check if all bytes are zero
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; $len]
            }

            /// Lowercase hex with `0x` prefix
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = PrimitiveError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s.trim())
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                $name(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                $name::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_bytes!(
    /// 20-byte account or contract address
    Address,
    20
);

fixed_bytes!(
    /// 32-byte hash, used for digests and transaction hashes
    H256,
    32
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_from_hex() {
        let addr = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        assert!(!addr.is_zero());

        let unprefixed = Address::from_hex("742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        assert_eq!(addr, unprefixed);
    }

    #[test]
    fn test_display_is_lowercase() {
        let addr: Address = "0x742D35CC6634C0532925A3B844BC9E7595F0AB3D".parse().unwrap();
        assert_eq!(addr.to_string(), "0x742d35cc6634c0532925a3b844bc9e7595f0ab3d");
        assert_eq!(format!("{:?}", Address::ZERO), format!("Address(0x{})", "00".repeat(20)));
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(
            Address::from_hex("0x1234"),
            Err(PrimitiveError::InvalidLength { expected: 20, got: 2 })
        );
        assert_eq!(
            H256::from_hex(""),
            Err(PrimitiveError::InvalidLength { expected: 32, got: 0 })
        );
    }

    #[test]
    fn test_invalid_hex() {
        let result = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aGGG");
        assert!(matches!(result, Err(PrimitiveError::InvalidHex(_))));
        assert!(matches!(H256::from_hex("0xzz"), Err(PrimitiveError::InvalidHex(_))));
    }

    #[test]
    fn test_h256_bytes() {
        let hash = H256::from_hex(&format!("0x{}01", "00".repeat(31))).unwrap();
        assert_eq!(hash.as_bytes()[31], 1);
        assert!(H256::ZERO.is_zero());
        assert_eq!(H256::ZERO.to_hex().len(), 66);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_hex_text() {
        let addr = Address::from_bytes([0x11; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x1111111111111111111111111111111111111111\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);

        assert!(serde_json::from_str::<H256>("\"0x12\"").is_err());
    }
}
