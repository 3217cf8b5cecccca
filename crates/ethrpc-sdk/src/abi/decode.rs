//! ABI decoding

use ethrpc_primitives::U256;

use super::hex::{ensure_hex_digits, WORD_HEX_LEN};
use crate::SdkError;

/// Offset of the first word in a `0x`-prefixed blob
pub const DEFAULT_START: usize = 2;

/// Iterator over fixed-width chunks of a hex blob.
///
/// Each item is a `0x`-prefixed chunk of `stride` hex digits.
#[derive(Debug, Clone)]
pub struct StrideWords<'a> {
    blob: &'a str,
    stride: usize,
    position: usize,
}

impl<'a> StrideWords<'a> {
    /// Parse every chunk as an unsigned 256-bit integer
    pub fn big_ints(self) -> impl Iterator<Item = Result<U256, SdkError>> + 'a {
        self.map(|word| {
            U256::from_str_radix(&word[2..], 16)
                .map_err(|e| SdkError::AbiDecode(format!("{}: {:?}", word, e)))
        })
    }
}

impl Iterator for StrideWords<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.position >= self.blob.len() {
            return None;
        }
        let end = self.position + self.stride;
        let chunk = &self.blob[self.position..end];
        self.position = end;
        Some(format!("0x{}", chunk))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.blob.len() - self.position) / self.stride;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for StrideWords<'_> {}

/// Split `blob` into chunks of `stride` hex digits starting at `start`.
///
/// The digits after `start` must be hex and divide evenly into chunks.
pub fn split_fixed_stride(
    blob: &str,
    stride: usize,
    start: usize,
) -> Result<StrideWords<'_>, SdkError> {
    if stride == 0 {
        return Err(SdkError::AbiDecode("stride must be positive".to_string()));
    }
    if blob.len() < start || !blob.is_char_boundary(start) {
        return Err(SdkError::AbiDecode(format!(
            "blob of {} characters has no data after offset {}",
            blob.len(),
            start
        )));
    }
    let body = &blob[start..];
    ensure_hex_digits(body)?;
    if body.len() % stride != 0 {
        return Err(SdkError::AbiDecode(format!(
            "{} hex digits do not split into words of {}",
            body.len(),
            stride
        )));
    }
    Ok(StrideWords {
        blob,
        stride,
        position: start,
    })
}

/// Split a `0x`-prefixed blob into 32-byte words
pub fn split_words(blob: &str) -> Result<StrideWords<'_>, SdkError> {
    split_fixed_stride(blob, WORD_HEX_LEN, DEFAULT_START)
}

/// Decode a `0x`-prefixed blob of 32-byte words into integers
pub fn decode_words(blob: &str) -> Result<Vec<U256>, SdkError> {
    split_words(blob)?.big_ints().collect()
}
