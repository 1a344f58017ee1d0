//! EIP-712 Struct Encoding
//!
//! Implements `encodeData` and `hashStruct` for struct instances.

use super::graph::hash_type_with_limit;
use super::types::*;
use crate::abi::{encode_word, parse_bytes, parse_string};
use crate::config::DEFAULT_MAX_TYPE_DEPTH;
use crate::error::{SignerError, SignerResult};
use crate::log_debug;
use crate::utils::crypto::keccak256;
use serde_json::Value;

/// Encode a struct instance: its type hash followed by one 32-byte word per
/// field present in `instance`.
///
/// Fields absent from the instance get no word at all. A field set to JSON
/// `null` is treated as absent, so `{"a": null}` encodes exactly like `{}`.
/// `string` and `bytes` values are hashed and nested structs are encoded
/// recursively and hashed. Arrays are rejected.
pub fn encode_data(type_name: &str, instance: &Value, schema: &Schema) -> SignerResult<Vec<u8>> {
    encode_data_with_limit(type_name, instance, schema, DEFAULT_MAX_TYPE_DEPTH)
}

/// [`encode_data`] with an explicit nesting limit
pub fn encode_data_with_limit(
    type_name: &str,
    instance: &Value,
    schema: &Schema,
    max_depth: usize,
) -> SignerResult<Vec<u8>> {
    encode_struct(type_name, instance, schema, 1, max_depth)
}

fn encode_struct(
    type_name: &str,
    instance: &Value,
    schema: &Schema,
    depth: usize,
    max_depth: usize,
) -> SignerResult<Vec<u8>> {
    if depth > max_depth {
        log_debug!("eip712", "struct nesting exceeds depth limit", type_name = type_name, limit = max_depth);
        return Err(SignerError::SchemaTooDeep {
            type_name: type_name.to_string(),
            limit: max_depth,
        });
    }

    let fields = schema
        .get(type_name)
        .ok_or_else(|| SignerError::unknown_type(type_name))?;

    let obj = instance.as_object().ok_or_else(|| {
        SignerError::type_mismatch(format!("{} instance must be an object, got {}", type_name, instance))
    })?;

    let mut encoded = Vec::with_capacity(32 * (fields.len() + 1));

    // First, add the type hash
    encoded.extend_from_slice(&hash_type_with_limit(type_name, schema, max_depth)?);

    for field in fields {
        let value = match obj.get(&field.name) {
            Some(Value::Null) | None => continue,
            Some(value) => value,
        };

        let word = match field.type_name.as_str() {
            "string" => keccak256(&parse_string(value)?),
            "bytes" => keccak256(&parse_bytes(value)?),
            nested if schema.contains_key(nested) => {
                keccak256(&encode_struct(nested, value, schema, depth + 1, max_depth)?)
            }
            array if array.ends_with(']') => {
                return Err(SignerError::UnsupportedFeature(format!(
                    "array field {}.{} of type {}",
                    type_name, field.name, array
                )));
            }
            primitive => encode_word(primitive, value)?,
        };
        encoded.extend_from_slice(&word);
    }

    Ok(encoded)
}

/// Hash a struct according to EIP-712
///
/// hashStruct(s) = keccak256(typeHash || encodeData(s))
pub fn hash_struct(type_name: &str, instance: &Value, schema: &Schema) -> SignerResult<[u8; 32]> {
    hash_struct_with_limit(type_name, instance, schema, DEFAULT_MAX_TYPE_DEPTH)
}

/// [`hash_struct`] with an explicit nesting limit
pub fn hash_struct_with_limit(
    type_name: &str,
    instance: &Value,
    schema: &Schema,
    max_depth: usize,
) -> SignerResult<[u8; 32]> {
    let encoded = encode_data_with_limit(type_name, instance, schema, max_depth)?;
    Ok(keccak256(&encoded))
}
