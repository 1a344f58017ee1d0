//! Legacy Typed Data Hashing
//!
//! The pre-EIP-712 `eth_signTypedData` format: a flat list of
//! `{name, type, value}` entries with no schema graph and no nesting.
//!
//! hash = keccak256(keccak256(pack("type name"...)) || keccak256(pack(types, values)))

use super::types::LegacyTypedField;
use crate::abi::solidity_sha3;
use crate::error::{SignerError, SignerResult};
use crate::log_debug;
use crate::utils::bytes::to_hex;
use crate::utils::crypto::keccak256_concat;
use serde_json::Value;

/// Hash a legacy typed message
pub fn typed_signature_hash_buffer(fields: &[LegacyTypedField]) -> SignerResult<[u8; 32]> {
    if fields.is_empty() {
        return Err(SignerError::invalid_input(
            "legacy typed data must be a non-empty list",
        ));
    }

    let mut schema = Vec::with_capacity(fields.len());
    let mut types = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());
    for (index, field) in fields.iter().enumerate() {
        if field.name.is_empty() {
            return Err(SignerError::invalid_input(format!(
                "legacy typed data entry {} has no name",
                index
            )));
        }
        schema.push(Value::String(format!("{} {}", field.type_name, field.name)));
        types.push(field.type_name.as_str());
        values.push(field.value.clone());
    }

    let schema_types = vec!["string"; schema.len()];
    let schema_hash = solidity_sha3(&schema_types, &schema)?;
    let values_hash = solidity_sha3(&types, &values)?;
    let hash = keccak256_concat(&[&schema_hash, &values_hash]);

    log_debug!(
        "eip712",
        "hashed legacy typed data",
        fields = fields.len(),
        hash = to_hex(&hash),
    );

    Ok(hash)
}

/// [`typed_signature_hash_buffer`] as `0x` hex
pub fn typed_signature_hash(fields: &[LegacyTypedField]) -> SignerResult<String> {
    Ok(to_hex(&typed_signature_hash_buffer(fields)?))
}

/// Parse a legacy typed message from JSON and hash it
pub fn typed_signature_hash_json(json: &str) -> SignerResult<[u8; 32]> {
    let fields: Vec<LegacyTypedField> = serde_json::from_str(json)?;
    typed_signature_hash_buffer(&fields)
}

#[cfg(test)]
mod legacy_tests {
    use super::*;
    use crate::abi::solidity_pack;
    use crate::utils::crypto::keccak256;
    use serde_json::json;

    fn greeting() -> Vec<LegacyTypedField> {
        vec![
            LegacyTypedField::new("message", "string", json!("Hi, Alice!")),
            LegacyTypedField::new("value", "uint", json!(42)),
        ]
    }

    #[test]
    fn test_hash_matches_manual_construction() {
        let schema_packed = b"string messageuint value".to_vec();

        let mut value_packed = b"Hi, Alice!".to_vec();
        let mut word = [0u8; 32];
        word[31] = 42;
        value_packed.extend_from_slice(&word);

        let mut outer = keccak256(&schema_packed).to_vec();
        outer.extend_from_slice(&keccak256(&value_packed));

        assert_eq!(typed_signature_hash_buffer(&greeting()).unwrap(), keccak256(&outer));
    }

    #[test]
    fn test_single_string_vector() {
        let fields = vec![LegacyTypedField::new("message", "string", json!("Hi, Alice!"))];
        assert_eq!(
            typed_signature_hash(&fields).unwrap(),
            "0x14b9f24872e28cc49e72dc104d7380d8e0ba84a3fe2e712704bcac66a5702bd5"
        );
    }

    #[test]
    fn test_uint8_hex_value_vector() {
        let fields = vec![
            LegacyTypedField::new("message", "string", json!("Hi, Alice!")),
            LegacyTypedField::new("value", "uint8", json!("0xff")),
        ];
        assert_eq!(
            typed_signature_hash(&fields).unwrap(),
            "0x82b031cb84846d1e9a181110efcd9e876a1e53786f261fbf244e17bd8a16c162"
        );
    }

    #[test]
    fn test_hex_form() {
        let hash = typed_signature_hash(&greeting()).unwrap();
        assert!(hash.starts_with("0x"));
        assert_eq!(hash.len(), 66);
        assert_eq!(hash, to_hex(&typed_signature_hash_buffer(&greeting()).unwrap()));
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(matches!(
            typed_signature_hash_buffer(&[]),
            Err(SignerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_name_rejected() {
        let fields = vec![
            LegacyTypedField::new("message", "string", json!("Hi")),
            LegacyTypedField::new("", "uint8", json!(1)),
        ];
        let err = typed_signature_hash_buffer(&fields).unwrap_err();
        assert_eq!(
            err,
            SignerError::invalid_input("legacy typed data entry 1 has no name")
        );
    }

    #[test]
    fn test_bytes_value_is_decoded_before_packing() {
        let fields = vec![LegacyTypedField::new("blob", "bytes", json!("0xdeadbeef"))];
        let packed = solidity_pack(&["bytes"], &[json!("0xdeadbeef")]).unwrap();
        assert_eq!(packed, vec![0xde, 0xad, 0xbe, 0xef]);

        let expected = keccak256_concat(&[&keccak256(b"bytes blob"), &keccak256(&packed)]);
        assert_eq!(typed_signature_hash_buffer(&fields).unwrap(), expected);
    }

    #[test]
    fn test_field_order_matters() {
        let mut reversed = greeting();
        reversed.reverse();
        assert_ne!(
            typed_signature_hash_buffer(&reversed).unwrap(),
            typed_signature_hash_buffer(&greeting()).unwrap()
        );
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"type": "string", "name": "message", "value": "Hi, Alice!"},
            {"type": "uint", "name": "value", "value": 42}
        ]"#;
        assert_eq!(
            typed_signature_hash_json(json).unwrap(),
            typed_signature_hash_buffer(&greeting()).unwrap()
        );
    }
}
