//! Hex and Byte Buffer Conversions
//!
//! Helpers for moving between `0x`-prefixed hex strings, raw buffers and
//! fixed 32-byte words.

use crate::error::{SignerError, SignerResult};
use serde_json::Value;

/// Remove a leading `0x`/`0X` if present
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Add a `0x` prefix unless one is already there
pub fn add_hex_prefix(s: &str) -> String {
    if s.starts_with("0x") || s.starts_with("0X") {
        s.to_string()
    } else {
        format!("0x{}", s)
    }
}

/// True for `0x` followed by zero or more hex digits
pub fn is_hex_string(s: &str) -> bool {
    s.strip_prefix("0x")
        .map(|rest| rest.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

/// Lower-case `0x`-prefixed hex
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode hex with or without prefix; odd lengths gain a leading zero nibble
pub fn decode_hex(s: &str) -> SignerResult<Vec<u8>> {
    let digits = strip_hex_prefix(s.trim());
    if digits.len() % 2 == 1 {
        Ok(hex::decode(format!("0{}", digits))?)
    } else {
        Ok(hex::decode(digits)?)
    }
}

/// Hex strings become their decoded bytes, anything else its UTF-8 bytes
pub fn to_buffer(s: &str) -> SignerResult<Vec<u8>> {
    if is_hex_string(s) {
        decode_hex(s)
    } else {
        Ok(s.as_bytes().to_vec())
    }
}

/// Left-pad a string with `0` up to `len` characters
pub fn pad_with_zeroes(s: &str, len: usize) -> String {
    if s.len() >= len {
        return s.to_string();
    }
    format!("{}{}", "0".repeat(len - s.len()), s)
}

/// Zero-pad on the left to exactly `len` bytes
pub fn set_length_left(bytes: &[u8], len: usize) -> SignerResult<Vec<u8>> {
    if bytes.len() > len {
        return Err(SignerError::invalid_input(format!(
            "{} bytes do not fit in {}",
            bytes.len(),
            len
        )));
    }
    let mut out = vec![0u8; len - bytes.len()];
    out.extend_from_slice(bytes);
    Ok(out)
}

/// Zero-pad on the right to exactly `len` bytes
pub fn set_length_right(bytes: &[u8], len: usize) -> SignerResult<Vec<u8>> {
    if bytes.len() > len {
        return Err(SignerError::invalid_input(format!(
            "{} bytes do not fit in {}",
            bytes.len(),
            len
        )));
    }
    let mut out = bytes.to_vec();
    out.resize(len, 0);
    Ok(out)
}

/// Left-pad up to 32 bytes with zeros.
///
/// Inputs shorter than a full word never carry a sign, so `[0x80]` becomes
/// `0x00..0080`. A full 32-byte word is returned unchanged.
pub fn to_unsigned_word(bytes: &[u8]) -> SignerResult<[u8; 32]> {
    if bytes.len() > 32 {
        return Err(SignerError::invalid_input(format!(
            "expected at most 32 bytes, got {}",
            bytes.len()
        )));
    }
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(bytes);
    Ok(word)
}

/// Normalize an address-like value to lower-case `0x` hex.
///
/// Empty values (`null`, `""`, `0`, `false`) yield `None`.
pub fn normalize(value: &Value) -> SignerResult<Option<String>> {
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(add_hex_prefix(&s.to_lowercase()))),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Ok(None),
            Some(u) => {
                let digits = format!("{:x}", u);
                Ok(Some(format!("0x{}", pad_with_zeroes(&digits, digits.len() + digits.len() % 2))))
            }
            None => Err(SignerError::type_mismatch(format!(
                "normalize requires a hex string or non-negative integer, received number: {}",
                n
            ))),
        },
        other => Err(SignerError::type_mismatch(format!(
            "normalize requires a hex string or non-negative integer, received {}: {}",
            json_kind(other),
            other
        ))),
    }
}

/// Human name of a JSON value's kind, for error messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
