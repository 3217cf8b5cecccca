//! ABI commands: selector, encode, decode

use clap::Args;
use ethrpc_sdk::abi::{
    canonical_signature, format_result, parse_signature, selector_for, split_fixed_stride,
    AbiLayout, EncodeOptions, ReturnKind, SelectorStyle, DEFAULT_START,
};
use ethrpc_sdk::Invocation;
use serde_json::Value;

use super::parse_params;
use crate::{config::Config, output::display_value, output::Output, CliError};

/// Arguments of `ethrpc selector`
#[derive(Debug, Args)]
pub struct SelectorArgs {
    /// Function name
    name: String,
    /// Compact signature, e.g. "iia"
    #[arg(default_value = "")]
    signature: String,
    /// Always print eight hex digits
    #[arg(long)]
    fixed: bool,
}

impl SelectorArgs {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let style = if self.fixed {
            SelectorStyle::Fixed
        } else {
            config.selector
        };
        let types = parse_signature(&self.signature)?;
        let canonical = canonical_signature(&self.name, &types);
        let selector = selector_for(&canonical, style);

        Output::new(json)
            .field("signature", &canonical)
            .field("selector", selector.as_str())
            .message(&format!("{}  {}", selector, canonical))
            .print();
        Ok(())
    }
}

/// Arguments of `ethrpc encode`
#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Function name
    name: String,
    /// Compact signature, e.g. "iia"
    #[arg(default_value = "")]
    signature: String,
    /// Parameters as JSON, e.g. '[5, "text", [1, 2]]'
    params: Option<String>,
    /// Always use eight-digit selectors
    #[arg(long)]
    fixed: bool,
    /// Use the standard offset-based layout
    #[arg(long)]
    standard: bool,
}

impl EncodeArgs {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let mut options: EncodeOptions = config.encode_options();
        if self.fixed {
            options.selector = SelectorStyle::Fixed;
        }
        if self.standard {
            options.layout = AbiLayout::Standard;
        }

        let invocation = Invocation {
            function: self.name,
            signature: self.signature,
            ..Default::default()
        }
        .with_json_params(parse_params(self.params.as_deref()))?;
        let data = invocation.calldata(&options)?;

        Output::new(json)
            .field("data", data.as_str())
            .message(data.as_str())
            .print();
        Ok(())
    }
}

/// Arguments of `ethrpc decode`
#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Hex result, `0x`-prefixed
    blob: String,
    /// Format as array, int, bignumber or string instead of splitting
    #[arg(long = "as")]
    returns: Option<String>,
    /// Hex digits per item
    #[arg(long, default_value_t = 64)]
    stride: usize,
    /// Offset of the first item
    #[arg(long, default_value_t = DEFAULT_START)]
    start: usize,
    /// Print items as decimal integers
    #[arg(long)]
    ints: bool,
}

impl DecodeArgs {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let decoded = match &self.returns {
            Some(kind) => {
                let kind = ReturnKind::from_text(kind);
                format_result(kind, Value::String(self.blob.clone())).to_json()
            }
            None => {
                let words = split_fixed_stride(&self.blob, self.stride, self.start)?;
                if self.ints {
                    let ints = words
                        .big_ints()
                        .map(|n| n.map(|n| Value::String(n.to_string())))
                        .collect::<Result<Vec<_>, _>>()?;
                    Value::Array(ints)
                } else {
                    Value::Array(words.map(Value::String).collect())
                }
            }
        };

        Output::new(json)
            .message(&display_value(&decoded))
            .field_value("decoded", decoded)
            .print();
        Ok(())
    }
}
