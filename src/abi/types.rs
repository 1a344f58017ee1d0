//! ABI type definitions and value parsing for Solidity elementary types

use crate::error::{SignerError, SignerResult};
use crate::utils::bytes::{decode_hex, is_hex_string, strip_hex_prefix, to_buffer};
use ethers_core::types::{I256, U256};
use serde_json::Value;
use std::fmt;

/// Solidity types understood by the word encoder and the packer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiType {
    /// uintN, N in 8..=256 step 8
    Uint(usize),
    /// intN, N in 8..=256 step 8
    Int(usize),
    Address,
    Bool,
    /// bytesN, N in 1..=32
    FixedBytes(usize),
    Bytes,
    String,
    /// T[] or T[N]
    Array(Box<AbiType>, Option<usize>),
}

impl AbiType {
    /// Parse type from string representation
    pub fn parse(s: &str) -> SignerResult<Self> {
        let s = s.trim();

        if s.ends_with(']') {
            let idx = s
                .rfind('[')
                .ok_or_else(|| SignerError::unknown_type(s))?;
            let size_str = &s[idx + 1..s.len() - 1];
            let size = if size_str.is_empty() {
                None
            } else {
                Some(
                    size_str
                        .parse::<usize>()
                        .map_err(|_| SignerError::unknown_type(s))?,
                )
            };
            let inner = Self::parse(&s[..idx])?;
            return Ok(AbiType::Array(Box::new(inner), size));
        }

        match s {
            "address" => return Ok(AbiType::Address),
            "bool" => return Ok(AbiType::Bool),
            "string" => return Ok(AbiType::String),
            "bytes" => return Ok(AbiType::Bytes),
            "uint" => return Ok(AbiType::Uint(256)),
            "int" => return Ok(AbiType::Int(256)),
            "byte" => return Ok(AbiType::FixedBytes(1)),
            _ => {}
        }

        if let Some(bits) = s.strip_prefix("uint") {
            return parse_int_width(bits).map(AbiType::Uint).ok_or_else(|| SignerError::unknown_type(s));
        }
        if let Some(bits) = s.strip_prefix("int") {
            return parse_int_width(bits).map(AbiType::Int).ok_or_else(|| SignerError::unknown_type(s));
        }
        if let Some(size) = s.strip_prefix("bytes") {
            return match size.parse::<usize>() {
                Ok(n) if (1..=32).contains(&n) => Ok(AbiType::FixedBytes(n)),
                _ => Err(SignerError::unknown_type(s)),
            };
        }

        Err(SignerError::unknown_type(s))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, AbiType::Array(..))
    }

    /// Get canonical type string (e.g. `uint` becomes `uint256`)
    pub fn canonical_type(&self) -> String {
        match self {
            AbiType::Uint(bits) => format!("uint{}", bits),
            AbiType::Int(bits) => format!("int{}", bits),
            AbiType::Address => "address".to_string(),
            AbiType::Bool => "bool".to_string(),
            AbiType::FixedBytes(n) => format!("bytes{}", n),
            AbiType::Bytes => "bytes".to_string(),
            AbiType::String => "string".to_string(),
            AbiType::Array(inner, None) => format!("{}[]", inner.canonical_type()),
            AbiType::Array(inner, Some(n)) => format!("{}[{}]", inner.canonical_type(), n),
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_type())
    }
}

/// Check if a name denotes an elementary Solidity type
pub fn is_elementary_type(type_name: &str) -> bool {
    matches!(AbiType::parse(type_name), Ok(t) if !t.is_array())
}

fn parse_int_width(bits: &str) -> Option<usize> {
    match bits.parse::<usize>() {
        Ok(n) if n > 0 && n <= 256 && n % 8 == 0 => Some(n),
        _ => None,
    }
}

/// Parse an unsigned integer (JSON number, decimal string or `0x` hex string)
/// and check it fits in `bits`.
pub fn parse_uint(value: &Value, bits: usize) -> SignerResult<U256> {
    let type_name = format!("uint{}", bits);
    let n = match value {
        Value::Number(n) => match n.as_u64() {
            Some(u) => U256::from(u),
            None => return Err(SignerError::invalid_value(&type_name, value)),
        },
        Value::String(s) => parse_u256_str(s.trim()).ok_or_else(|| SignerError::invalid_value(&type_name, s))?,
        _ => return Err(SignerError::invalid_value(&type_name, value)),
    };

    if n.bits() > bits {
        return Err(SignerError::invalid_value(
            &type_name,
            format!("{} exceeds {} bits", value, bits),
        ));
    }
    Ok(n)
}

/// Parse a signed integer and check it fits in `bits` (two's complement)
pub fn parse_int(value: &Value, bits: usize) -> SignerResult<I256> {
    let type_name = format!("int{}", bits);
    let n = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => I256::from(i),
            None => return Err(SignerError::invalid_value(&type_name, value)),
        },
        Value::String(s) => parse_i256_str(s.trim()).ok_or_else(|| SignerError::invalid_value(&type_name, s))?,
        _ => return Err(SignerError::invalid_value(&type_name, value)),
    };

    // Every bit above the sign bit must repeat the sign bit
    let high = n.into_raw() >> (bits - 1);
    if !(high.is_zero() || high == U256::MAX >> (bits - 1)) {
        return Err(SignerError::invalid_value(
            &type_name,
            format!("{} exceeds {} bits", value, bits),
        ));
    }
    Ok(n)
}

fn parse_u256_str(s: &str) -> Option<U256> {
    if s.starts_with("0x") || s.starts_with("0X") {
        let digits = strip_hex_prefix(s);
        if digits.is_empty() {
            return Some(U256::zero());
        }
        U256::from_str_radix(digits, 16).ok()
    } else if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
        U256::from_dec_str(s).ok()
    } else {
        None
    }
}

fn parse_i256_str(s: &str) -> Option<I256> {
    let (negative, magnitude) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let abs = parse_u256_str(magnitude)?;
    if abs.bit(255) {
        // Only -2^255 has its top bit set
        return if negative && abs == U256::one() << 255usize {
            Some(I256::from_raw(abs))
        } else {
            None
        };
    }
    let n = I256::from_raw(abs);
    if negative {
        n.checked_neg()
    } else {
        Some(n)
    }
}

/// Parse a 20-byte address given as hex
pub fn parse_address(value: &Value) -> SignerResult<[u8; 20]> {
    let s = value
        .as_str()
        .filter(|s| is_hex_string(s) || s.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| SignerError::invalid_value("address", value))?;

    let bytes = decode_hex(s)?;
    if bytes.len() > 20 {
        return Err(SignerError::invalid_value(
            "address",
            format!("{} is longer than 20 bytes", s),
        ));
    }

    let mut result = [0u8; 20];
    result[20 - bytes.len()..].copy_from_slice(&bytes);
    Ok(result)
}

/// Parse a boolean (JSON bool, or 0/1)
pub fn parse_bool(value: &Value) -> SignerResult<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) if n.as_u64() == Some(0) => Ok(false),
        Value::Number(n) if n.as_u64() == Some(1) => Ok(true),
        _ => Err(SignerError::invalid_value("bool", value)),
    }
}

/// Parse a bytesN value, at most `size` bytes long
pub fn parse_fixed_bytes(value: &Value, size: usize) -> SignerResult<Vec<u8>> {
    let type_name = format!("bytes{}", size);
    let s = value
        .as_str()
        .ok_or_else(|| SignerError::invalid_value(&type_name, value))?;
    let bytes = to_buffer(s)?;
    if bytes.len() > size {
        return Err(SignerError::invalid_value(
            &type_name,
            format!("bytes too long: {} > {}", bytes.len(), size),
        ));
    }
    Ok(bytes)
}

/// Parse a dynamic `bytes` value (hex or UTF-8 string)
pub fn parse_bytes(value: &Value) -> SignerResult<Vec<u8>> {
    match value {
        Value::String(s) => to_buffer(s),
        _ => Err(SignerError::invalid_value("bytes", value)),
    }
}

/// Parse a `string` value; numbers and booleans use their JSON text
pub fn parse_string(value: &Value) -> SignerResult<Vec<u8>> {
    match value {
        Value::String(s) => Ok(s.as_bytes().to_vec()),
        Value::Number(_) | Value::Bool(_) => Ok(value.to_string().into_bytes()),
        _ => Err(SignerError::invalid_value("string", value)),
    }
}
