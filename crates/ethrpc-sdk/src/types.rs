//! SDK types

use ethrpc_primitives::{Address, Gas, U256};
use serde::Serialize;

/// Gas sent with calls and transactions that do not set one (`0x2dc6c0`)
pub const DEFAULT_GAS: Gas = 3_000_000;

/// Block identifier for RPC queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockId {
    /// Block number
    Number(u64),
    /// Latest block
    #[default]
    Latest,
    /// Pending block (includes pending transactions)
    Pending,
    /// Earliest block (genesis)
    Earliest,
}

impl Serialize for BlockId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            BlockId::Number(n) => serializer.serialize_str(&format!("0x{:x}", n)),
            BlockId::Latest => serializer.serialize_str("latest"),
            BlockId::Pending => serializer.serialize_str("pending"),
            BlockId::Earliest => serializer.serialize_str("earliest"),
        }
    }
}

impl std::str::FromStr for BlockId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(BlockId::Latest),
            "pending" => Ok(BlockId::Pending),
            "earliest" => Ok(BlockId::Earliest),
            other => {
                let parsed = match other.strip_prefix("0x") {
                    Some(hex) => u64::from_str_radix(hex, 16),
                    None => other.parse(),
                };
                parsed
                    .map(BlockId::Number)
                    .map_err(|_| format!("invalid block: {}", other))
            }
        }
    }
}

/// Transaction object for `eth_call` and `eth_sendTransaction`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionRequest {
    /// Sender address
    pub from: Option<Address>,
    /// Recipient address (`None` for contract creation)
    pub to: Option<Address>,
    /// Input data, `0x`-prefixed hex
    pub data: Option<String>,
    /// Gas limit
    pub gas: Option<Gas>,
    /// Gas price
    pub gas_price: Option<u128>,
    /// Value to transfer, in wei
    pub value: Option<U256>,
}

impl TransactionRequest {
    /// Copy of this request with `gas` filled in when unset
    pub fn with_default_gas(&self, default_gas: Gas) -> Self {
        Self {
            gas: Some(self.gas.unwrap_or(default_gas)),
            ..self.clone()
        }
    }
}

impl Serialize for TransactionRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let count = [
            self.from.is_some(),
            self.to.is_some(),
            self.data.is_some(),
            self.gas.is_some(),
            self.gas_price.is_some(),
            self.value.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count();

        let mut map = serializer.serialize_map(Some(count))?;

        if let Some(from) = &self.from {
            map.serialize_entry("from", &from.to_hex())?;
        }
        if let Some(to) = &self.to {
            map.serialize_entry("to", &to.to_hex())?;
        }
        if let Some(data) = &self.data {
            map.serialize_entry("data", data)?;
        }
        if let Some(gas) = &self.gas {
            map.serialize_entry("gas", &format!("0x{:x}", gas))?;
        }
        if let Some(gas_price) = &self.gas_price {
            map.serialize_entry("gasPrice", &format!("0x{:x}", gas_price))?;
        }
        if let Some(value) = &self.value {
            map.serialize_entry("value", &format!("0x{:x}", value))?;
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_id_serialize() {
        assert_eq!(serde_json::to_string(&BlockId::Latest).unwrap(), "\"latest\"");
        assert_eq!(serde_json::to_string(&BlockId::Number(100)).unwrap(), "\"0x64\"");
        assert_eq!(serde_json::to_string(&BlockId::Pending).unwrap(), "\"pending\"");
    }

    #[test]
    fn test_block_id_from_str() {
        assert_eq!("latest".parse::<BlockId>().unwrap(), BlockId::Latest);
        assert_eq!("0x10".parse::<BlockId>().unwrap(), BlockId::Number(16));
        assert_eq!("16".parse::<BlockId>().unwrap(), BlockId::Number(16));
        assert!("soon".parse::<BlockId>().is_err());
    }

    #[test]
    fn test_tx_request_serialize_skips_none() {
        let req = TransactionRequest {
            to: Some(Address::ZERO),
            data: Some("0x1234".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            json!({"to": "0x0000000000000000000000000000000000000000", "data": "0x1234"})
        );
    }

    #[test]
    fn test_tx_request_quantities_are_hex() {
        let req = TransactionRequest {
            value: Some(U256::from(1000)),
            gas_price: Some(1_000_000_000),
            ..Default::default()
        }
        .with_default_gas(DEFAULT_GAS);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["gas"], "0x2dc6c0");
        assert_eq!(json["gasPrice"], "0x3b9aca00");
        assert_eq!(json["value"], "0x3e8");
    }

    #[test]
    fn test_with_default_gas_keeps_explicit() {
        let req = TransactionRequest {
            gas: Some(21000),
            ..Default::default()
        };
        assert_eq!(req.with_default_gas(DEFAULT_GAS).gas, Some(21000));
        assert_eq!(req.gas, Some(21000));
    }
}
