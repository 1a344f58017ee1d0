//! Ethereum Personal Message Signing (EIP-191)
//!
//! Implements personal_sign.
//! Reference: https://eips.ethereum.org/EIPS/eip-191
//!
//! Format: "\x19Ethereum Signed Message:\n" + len(message) + message

use crate::eip712::signer::sign_hash;
use crate::error::SignerResult;
use crate::log_debug;
use crate::signature::SignatureParams;
use crate::utils::bytes::{decode_hex, to_buffer};
use crate::utils::crypto::keccak256_concat;

/// Ethereum message prefix for personal_sign
const ETH_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Hash a message with the Ethereum personal sign prefix
///
/// The length is the decimal byte length of `message`.
pub fn personal_sign_hash(message: &[u8]) -> [u8; 32] {
    let prefix = format!("{}{}", ETH_MESSAGE_PREFIX, message.len());
    keccak256_concat(&[prefix.as_bytes(), message])
}

/// Sign raw message bytes
pub fn personal_sign_bytes(message: &[u8], private_key: &[u8]) -> SignerResult<SignatureParams> {
    sign_hash(&personal_sign_hash(message), private_key)
}

/// Sign a personal message, returning the RPC hex signature
///
/// `data` is decoded as hex when it is a `0x` hex string and taken as UTF-8
/// otherwise.
pub fn personal_sign(private_key: &[u8], data: &str) -> SignerResult<String> {
    let message = to_buffer(data)?;
    let signature = personal_sign_bytes(&message, private_key)?.to_rpc_sig();

    log_debug!(
        "message_signer",
        "signed personal message",
        message_len = message.len(),
        signature = signature,
    );

    Ok(signature)
}

/// Sign a hex-encoded message (with or without 0x prefix)
pub fn personal_sign_hex(hex_message: &str, private_key: &[u8]) -> SignerResult<String> {
    let message = decode_hex(hex_message)?;
    Ok(personal_sign_bytes(&message, private_key)?.to_rpc_sig())
}
