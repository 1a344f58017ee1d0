//! EIP-712 Hashing
//!
//! Domain separation and the final `\x19\x01` signing hash.

use super::encoder::hash_struct_with_limit;
use super::types::*;
use crate::config::SignerConfig;
use crate::error::SignerResult;
use crate::log_debug;
use crate::utils::bytes::to_hex;
use crate::utils::crypto::keccak256_concat;
use serde_json::Value;

/// Magic prefix for EIP-712 encoding (EIP-191 version byte 0x01)
const EIP712_PREFIX: &[u8] = b"\x19\x01";

/// Get the pre-image components (for external signing)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eip712PreImage {
    pub domain_separator: [u8; 32],
    pub struct_hash: [u8; 32],
    pub final_hash: [u8; 32],
}

/// Calculate the domain separator hash
///
/// domainSeparator = hashStruct(eip712Domain)
pub fn domain_separator(typed_data: &TypedData) -> SignerResult<[u8; 32]> {
    domain_separator_with_config(typed_data, &SignerConfig::default())
}

/// [`domain_separator`] honoring the configured limits
pub fn domain_separator_with_config(
    typed_data: &TypedData,
    config: &SignerConfig,
) -> SignerResult<[u8; 32]> {
    typed_data.validate()?;
    hash_struct_with_limit(
        DOMAIN_TYPE,
        &typed_data.domain,
        &typed_data.types,
        config.max_type_depth,
    )
}

/// Calculate the final EIP-712 hash for signing
///
/// hash = keccak256("\x19\x01" || domainSeparator || hashStruct(message))
pub fn hash_typed_data(typed_data: &TypedData) -> SignerResult<[u8; 32]> {
    hash_typed_data_with_config(typed_data, &SignerConfig::default())
}

/// [`hash_typed_data`] honoring the configured limits
pub fn hash_typed_data_with_config(
    typed_data: &TypedData,
    config: &SignerConfig,
) -> SignerResult<[u8; 32]> {
    Ok(get_pre_image_with_config(typed_data, config)?.final_hash)
}

/// Sanitize an arbitrary JSON payload, then hash it
pub fn hash_typed_data_value(value: &Value) -> SignerResult<[u8; 32]> {
    hash_typed_data(&TypedData::sanitize(value)?)
}

/// Calculate the pre-image components for EIP-712
pub fn get_pre_image(typed_data: &TypedData) -> SignerResult<Eip712PreImage> {
    get_pre_image_with_config(typed_data, &SignerConfig::default())
}

/// [`get_pre_image`] honoring the configured limits
pub fn get_pre_image_with_config(
    typed_data: &TypedData,
    config: &SignerConfig,
) -> SignerResult<Eip712PreImage> {
    let domain_separator = domain_separator_with_config(typed_data, config)?;
    let struct_hash = hash_struct_with_limit(
        &typed_data.primary_type,
        &typed_data.message,
        &typed_data.types,
        config.max_type_depth,
    )?;
    let final_hash = keccak256_concat(&[EIP712_PREFIX, &domain_separator, &struct_hash]);

    log_debug!(
        "eip712",
        "hashed typed data",
        primary_type = typed_data.primary_type,
        domain_hash = to_hex(&domain_separator),
        hash = to_hex(&final_hash),
    );

    Ok(Eip712PreImage {
        domain_separator,
        struct_hash,
        final_hash,
    })
}

#[cfg(test)]
mod hasher_tests {
    use super::*;
    use crate::error::SignerError;
    use serde_json::json;

    fn create_mail_example() -> TypedData {
        let json = r#"{
            "types": {
                "EIP712Domain": [
                    {"name": "name", "type": "string"},
                    {"name": "version", "type": "string"},
                    {"name": "chainId", "type": "uint256"},
                    {"name": "verifyingContract", "type": "address"}
                ],
                "Person": [
                    {"name": "name", "type": "string"},
                    {"name": "wallet", "type": "address"}
                ],
                "Mail": [
                    {"name": "from", "type": "Person"},
                    {"name": "to", "type": "Person"},
                    {"name": "contents", "type": "string"}
                ]
            },
            "primaryType": "Mail",
            "domain": {
                "name": "Ether Mail",
                "version": "1",
                "chainId": 1,
                "verifyingContract": "0xCcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC"
            },
            "message": {
                "from": {
                    "name": "Cow",
                    "wallet": "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826"
                },
                "to": {
                    "name": "Bob",
                    "wallet": "0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB"
                },
                "contents": "Hello, Bob!"
            }
        }"#;

        TypedData::from_json(json).unwrap()
    }

    #[test]
    fn test_hash_typed_data_mail() {
        let typed_data = create_mail_example();
        let hash = hash_typed_data(&typed_data).unwrap();

        // Reference hash for the EIP-712 Mail example
        let expected = "be609aee343fb3c4b28e1df9e632fca64fcfaede20f02e86244efddf30957bd2";
        assert_eq!(hex::encode(hash), expected);
    }

    #[test]
    fn test_pre_image_components() {
        let typed_data = create_mail_example();
        let pre_image = get_pre_image(&typed_data).unwrap();

        assert_eq!(
            hex::encode(pre_image.domain_separator),
            "f2cee375fa42b42143804025fc449deafd50cc031ca257e0b194a650a912090f"
        );
        assert_eq!(
            hex::encode(pre_image.struct_hash),
            "c52c0ee5d84264471806290a3f2c4cecfc5490626bf912d01f240d7a274b371e"
        );
        assert_eq!(pre_image.final_hash, hash_typed_data(&typed_data).unwrap());
        assert_eq!(domain_separator(&typed_data).unwrap(), pre_image.domain_separator);
    }

    #[test]
    fn test_hash_typed_data_value_ignores_extra_keys() {
        let typed_data = create_mail_example();
        let mut raw = serde_json::to_value(&typed_data).unwrap();
        raw["unrelated"] = json!({"foo": "bar"});

        assert_eq!(
            hash_typed_data_value(&raw).unwrap(),
            hash_typed_data(&typed_data).unwrap()
        );
    }

    #[test]
    fn test_missing_domain_type_rejected() {
        let mut typed_data = create_mail_example();
        typed_data.types.remove(DOMAIN_TYPE);
        assert_eq!(
            hash_typed_data(&typed_data).unwrap_err(),
            SignerError::unknown_type(DOMAIN_TYPE)
        );
    }

    #[test]
    fn test_domain_separator_validates_like_pre_image() {
        let mut typed_data = create_mail_example();
        typed_data.primary_type = "Letter".to_string();
        assert_eq!(
            domain_separator(&typed_data).unwrap_err(),
            SignerError::unknown_type("Letter")
        );
        assert_eq!(
            domain_separator(&typed_data).unwrap_err(),
            get_pre_image(&typed_data).unwrap_err()
        );

        let mut typed_data = create_mail_example();
        typed_data.types.remove(DOMAIN_TYPE);
        assert_eq!(
            domain_separator(&typed_data).unwrap_err(),
            SignerError::unknown_type(DOMAIN_TYPE)
        );
    }

    #[test]
    fn test_strict_config_limits_depth() {
        let typed_data = create_mail_example();
        let shallow = SignerConfig::standard().with_max_type_depth(1);
        let err = hash_typed_data_with_config(&typed_data, &shallow).unwrap_err();
        assert!(matches!(err, SignerError::SchemaTooDeep { .. }));

        let strict = SignerConfig::strict();
        assert_eq!(
            hash_typed_data_with_config(&typed_data, &strict).unwrap(),
            hash_typed_data(&typed_data).unwrap()
        );
    }
}
