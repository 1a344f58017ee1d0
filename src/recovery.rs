//! Signer Recovery
//!
//! Recovers the public key and address behind an RPC hex signature. Each
//! entry point differs only in how the signed hash is built.

use crate::config::SignerConfig;
use crate::eip712::{
    hash_typed_data_with_config, parse_private_key, typed_signature_hash_buffer,
    LegacyTypedField, TypedData,
};
use crate::error::{SignerError, SignerResult};
use crate::log_debug;
use crate::message_signer::ethereum::personal_sign_hash;
use crate::signature::{from_rpc_sig, SignatureParams};
use crate::utils::bytes::{to_buffer, to_hex};
use crate::utils::crypto::keccak256;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1};

/// Recover the 64-byte uncompressed public key (no `0x04` tag) from an RPC
/// hex signature
pub fn recover_public_key(hash: &[u8; 32], sig: &str) -> SignerResult<[u8; 64]> {
    let params = from_rpc_sig(sig)?;
    recover_public_key_from_params(hash, &params)
}

/// Recover the public key from parsed signature components
pub fn recover_public_key_from_params(
    hash: &[u8; 32],
    params: &SignatureParams,
) -> SignerResult<[u8; 64]> {
    let recovery_id = params.recovery_id().ok_or_else(|| {
        SignerError::malformed_signature(format!("invalid v value {}", params.v))
    })?;

    let rec_id = RecoveryId::from_i32(i32::from(recovery_id))
        .map_err(|e| SignerError::malformed_signature(e.to_string()))?;

    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&params.r);
    compact[32..].copy_from_slice(&params.s);

    let recoverable = RecoverableSignature::from_compact(&compact, rec_id)
        .map_err(|e| SignerError::RecoveryFailure(e.to_string()))?;

    let message = Message::from_digest_slice(hash)
        .map_err(|e| SignerError::invalid_input(e.to_string()))?;

    let secp = Secp256k1::new();
    let public_key = secp
        .recover_ecdsa(&message, &recoverable)
        .map_err(|e| SignerError::RecoveryFailure(e.to_string()))?;

    Ok(uncompressed_body(&public_key))
}

fn uncompressed_body(public_key: &PublicKey) -> [u8; 64] {
    let serialized = public_key.serialize_uncompressed();
    let mut out = [0u8; 64];
    out.copy_from_slice(&serialized[1..]);
    out
}

/// Ethereum address of a 64-byte public key: the last 20 bytes of its hash
pub fn public_to_address(public_key: &[u8; 64]) -> [u8; 20] {
    let hash = keccak256(public_key);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Recover the signer's address as lower-case `0x` hex
pub fn recover_address(hash: &[u8; 32], sig: &str) -> SignerResult<String> {
    let public_key = recover_public_key(hash, sig)?;
    let address = to_hex(&public_to_address(&public_key));

    log_debug!("recovery", "recovered signer", hash = to_hex(hash), signer = address);

    Ok(address)
}

/// Address controlled by a raw 32-byte private key
pub fn private_to_address(private_key: &[u8]) -> SignerResult<String> {
    let secret_key = parse_private_key(private_key)?;
    let secp = Secp256k1::new();
    let public_key = PublicKey::from_secret_key(&secp, &secret_key);
    Ok(to_hex(&public_to_address(&uncompressed_body(&public_key))))
}

/// Recover the signer of EIP-712 typed data
pub fn recover_typed_signature(typed_data: &TypedData, sig: &str) -> SignerResult<String> {
    recover_typed_signature_with_config(typed_data, sig, &SignerConfig::default())
}

/// [`recover_typed_signature`] honoring the configured limits
pub fn recover_typed_signature_with_config(
    typed_data: &TypedData,
    sig: &str,
    config: &SignerConfig,
) -> SignerResult<String> {
    let hash = hash_typed_data_with_config(typed_data, config)?;
    recover_address(&hash, sig)
}

/// Recover the signer of a legacy typed message
pub fn recover_typed_signature_legacy(fields: &[LegacyTypedField], sig: &str) -> SignerResult<String> {
    let hash = typed_signature_hash_buffer(fields)?;
    recover_address(&hash, sig)
}

/// Recover the signer of a personal message (hex or UTF-8)
pub fn recover_personal_signature(data: &str, sig: &str) -> SignerResult<String> {
    let hash = personal_sign_hash(&to_buffer(data)?);
    recover_address(&hash, sig)
}

/// Recover the public key behind a personal message signature as `0x` hex
pub fn extract_public_key(data: &str, sig: &str) -> SignerResult<String> {
    let hash = personal_sign_hash(&to_buffer(data)?);
    Ok(to_hex(&recover_public_key(&hash, sig)?))
}
