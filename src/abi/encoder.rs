//! ABI word encoding and Solidity tight packing
//!
//! `encode_word` produces the 32-byte head slot used by EIP-712 struct
//! encoding. `solidity_pack` reproduces `abi.encodePacked` for the legacy
//! typed-data hash.

use super::types::*;
use crate::error::{SignerError, SignerResult};
use crate::utils::crypto::keccak256;
use serde_json::Value;

/// Encode a value as a single 32-byte ABI word
pub fn encode_word(type_name: &str, value: &Value) -> SignerResult<[u8; 32]> {
    let abi_type = AbiType::parse(type_name)?;
    encode_word_typed(&abi_type, value)
}

/// Encode a value of an already parsed type as a 32-byte ABI word
pub fn encode_word_typed(abi_type: &AbiType, value: &Value) -> SignerResult<[u8; 32]> {
    let mut result = [0u8; 32];

    match abi_type {
        // Right-aligned big-endian
        AbiType::Uint(bits) => {
            parse_uint(value, *bits)?.to_big_endian(&mut result);
        }

        // Two's complement, sign-extended to 256 bits
        AbiType::Int(bits) => {
            parse_int(value, *bits)?.into_raw().to_big_endian(&mut result);
        }

        // address - 20 bytes, left-padded to 32
        AbiType::Address => {
            result[12..].copy_from_slice(&parse_address(value)?);
        }

        AbiType::Bool => {
            result[31] = u8::from(parse_bool(value)?);
        }

        // bytesN - left-aligned, right-padded
        AbiType::FixedBytes(size) => {
            let bytes = parse_fixed_bytes(value, *size)?;
            result[..bytes.len()].copy_from_slice(&bytes);
        }

        AbiType::Bytes | AbiType::String => {
            return Err(SignerError::invalid_value(
                abi_type.canonical_type(),
                "dynamic types have no single-word encoding",
            ));
        }

        AbiType::Array(..) => {
            return Err(SignerError::UnsupportedFeature(format!(
                "array type {} has no single-word encoding",
                abi_type
            )));
        }
    }

    Ok(result)
}

/// Tightly pack one value (`abi.encodePacked` rules)
pub fn pack_value(abi_type: &AbiType, value: &Value) -> SignerResult<Vec<u8>> {
    match abi_type {
        AbiType::Uint(bits) | AbiType::Int(bits) => {
            let word = encode_word_typed(abi_type, value)?;
            Ok(word[32 - bits / 8..].to_vec())
        }
        AbiType::Address => Ok(parse_address(value)?.to_vec()),
        AbiType::Bool => Ok(vec![u8::from(parse_bool(value)?)]),
        AbiType::FixedBytes(size) => {
            let mut bytes = parse_fixed_bytes(value, *size)?;
            bytes.resize(*size, 0);
            Ok(bytes)
        }
        AbiType::Bytes => parse_bytes(value),
        AbiType::String => parse_string(value),
        AbiType::Array(..) => Err(SignerError::UnsupportedFeature(format!(
            "packing array type {} is not supported",
            abi_type
        ))),
    }
}

/// Tightly pack a list of values against their Solidity types
pub fn solidity_pack<S: AsRef<str>>(types: &[S], values: &[Value]) -> SignerResult<Vec<u8>> {
    if types.len() != values.len() {
        return Err(SignerError::invalid_input(format!(
            "value count {} doesn't match type count {}",
            values.len(),
            types.len()
        )));
    }

    let mut packed = Vec::new();
    for (type_name, value) in types.iter().zip(values) {
        let abi_type = AbiType::parse(type_name.as_ref())?;
        packed.extend(pack_value(&abi_type, value)?);
    }
    Ok(packed)
}

/// Keccak256 of the tightly packed values
pub fn solidity_sha3<S: AsRef<str>>(types: &[S], values: &[Value]) -> SignerResult<[u8; 32]> {
    Ok(keccak256(&solidity_pack(types, values)?))
}
