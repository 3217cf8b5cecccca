//! CLI configuration management

use ethrpc_sdk::abi::{AbiLayout, EncodeOptions, SelectorStyle};
use ethrpc_sdk::types::DEFAULT_GAS;
use ethrpc_sdk::{Address, ClientConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::CliError;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// RPC endpoint URL
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Sender used when an invocation names none
    #[serde(default)]
    pub primary_account: Option<String>,
    /// Default gas limit
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,
    /// Selector rendering
    #[serde(default)]
    pub selector: SelectorStyle,
    /// Calldata layout
    #[serde(default)]
    pub layout: AbiLayout,
    /// HTTP request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_rpc_url() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_gas_limit() -> u64 {
    DEFAULT_GAS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            primary_account: None,
            gas_limit: default_gas_limit(),
            selector: SelectorStyle::default(),
            layout: AbiLayout::default(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".ethrpc"))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load config from `path`, or the default location, or return default
    pub fn load(path: Option<&Path>) -> Self {
        path.map(Path::to_path_buf)
            .or_else(Self::config_path)
            .filter(|path| path.exists())
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save config to `path`, or the default location
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf, CliError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(Self::config_path)
            .ok_or_else(|| CliError::Config("Cannot determine config path".to_string()))?;

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Selector and layout choices
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            selector: self.selector,
            layout: self.layout,
        }
    }

    /// SDK client configuration
    pub fn client_config(&self) -> Result<ClientConfig, CliError> {
        let mut config = ClientConfig::default()
            .with_default_gas(self.gas_limit)
            .with_encoding(self.encode_options());
        if let Some(account) = &self.primary_account {
            let account = Address::from_hex(account)
                .map_err(|e| CliError::InvalidAddress(e.to_string()))?;
            config = config.with_primary_account(account);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(config.gas_limit, 0x2dc6c0);
        assert_eq!(config.selector, SelectorStyle::StripLeadingZeros);
        assert_eq!(config.layout, AbiLayout::Legacy);
        assert!(config.primary_account.is_none());
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("rpc_url"));
        assert!(toml.contains("selector = \"strip-leading-zeros\""));
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            rpc_url = "http://example.com:8545"
            primary_account = "0x742d35cc6634c0532925a3b844bc9e7595f0ab3d"
            selector = "fixed"
            layout = "standard"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.rpc_url, "http://example.com:8545");
        assert_eq!(config.gas_limit, 3_000_000);
        assert_eq!(config.selector, SelectorStyle::Fixed);
        assert_eq!(config.layout, AbiLayout::Standard);

        let client = config.client_config().unwrap();
        assert!(client.primary_account.is_some());
        assert_eq!(client.encoding.layout, AbiLayout::Standard);
    }

    #[test]
    fn test_config_bad_account() {
        let config = Config {
            primary_account: Some("0x1234".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.client_config(), Err(CliError::InvalidAddress(_))));
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            gas_limit: 21000,
            ..Default::default()
        };
        config.save(Some(&path)).unwrap();
        assert_eq!(Config::load(Some(&path)), config);
    }
}
