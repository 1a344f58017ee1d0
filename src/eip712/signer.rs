//! EIP-712 Signing
//!
//! secp256k1 recoverable ECDSA over typed-data hashes.

use super::hasher::hash_typed_data_with_config;
use super::legacy::typed_signature_hash_buffer;
use super::types::*;
use crate::config::SignerConfig;
use crate::error::{SignerError, SignerResult};
use crate::log_debug;
use crate::signature::SignatureParams;
use crate::utils::bytes::to_hex;
use secp256k1::{Message, Secp256k1, SecretKey};

/// Parse a raw 32-byte secp256k1 private key
pub fn parse_private_key(private_key: &[u8]) -> SignerResult<SecretKey> {
    if private_key.len() != 32 {
        return Err(SignerError::InvalidPrivateKey(format!(
            "expected 32 bytes, got {}",
            private_key.len()
        )));
    }

    SecretKey::from_slice(private_key).map_err(|e| SignerError::InvalidPrivateKey(e.to_string()))
}

/// Sign a pre-computed hash
pub fn sign_hash(hash: &[u8; 32], private_key: &[u8]) -> SignerResult<SignatureParams> {
    let secret_key = parse_private_key(private_key)?;
    let secp = Secp256k1::new();

    let message = Message::from_digest_slice(hash)
        .map_err(|e| SignerError::invalid_input(e.to_string()))?;

    let (recovery_id, compact) = secp
        .sign_ecdsa_recoverable(&message, &secret_key)
        .serialize_compact();

    // v is recovery_id + 27 (Ethereum standard)
    Ok(SignatureParams::from_compact(&compact, recovery_id.to_i32() as u8))
}

/// Sign EIP-712 typed data, returning the RPC hex signature
pub fn sign_typed_data(typed_data: &TypedData, private_key: &[u8]) -> SignerResult<String> {
    sign_typed_data_with_config(typed_data, private_key, &SignerConfig::default())
}

/// [`sign_typed_data`] honoring the configured limits
pub fn sign_typed_data_with_config(
    typed_data: &TypedData,
    private_key: &[u8],
    config: &SignerConfig,
) -> SignerResult<String> {
    let hash = hash_typed_data_with_config(typed_data, config)?;
    let signature = sign_hash(&hash, private_key)?.to_rpc_sig();

    log_debug!(
        "eip712",
        "signed typed data",
        primary_type = typed_data.primary_type,
        hash = to_hex(&hash),
        signature = signature,
    );

    Ok(signature)
}

/// Sign a legacy typed message, returning the RPC hex signature
pub fn sign_typed_data_legacy(fields: &[LegacyTypedField], private_key: &[u8]) -> SignerResult<String> {
    let hash = typed_signature_hash_buffer(fields)?;
    let signature = sign_hash(&hash, private_key)?.to_rpc_sig();

    log_debug!("eip712", "signed legacy typed data", signature = signature);

    Ok(signature)
}
