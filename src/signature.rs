//! Signature Codec
//!
//! Conversion between `(v, r, s)` components and the 65-byte RPC hex form
//! `0x || r || s || v` used by `eth_sign`, `personal_sign` and
//! `eth_signTypedData`.

use crate::error::{SignerError, SignerResult};
use crate::utils::bytes::{strip_hex_prefix, to_unsigned_word};
use serde::{Deserialize, Serialize};

/// Length of an RPC signature in bytes
pub const SIGNATURE_LENGTH: usize = 65;

/// ECDSA signature components (Ethereum convention, v in {27, 28})
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureParams {
    #[serde(with = "hex_word")]
    pub r: [u8; 32],
    #[serde(with = "hex_word")]
    pub s: [u8; 32],
    pub v: u8,
}

impl SignatureParams {
    pub fn new(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        Self { r, s, v }
    }

    /// Build from a compact `r || s` signature and a secp256k1 recovery id
    pub fn from_compact(compact: &[u8; 64], recovery_id: u8) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&compact[..32]);
        s.copy_from_slice(&compact[32..]);
        Self::new(r, s, recovery_id + 27)
    }

    /// Recovery id (0 or 1) if v is in canonical form
    pub fn recovery_id(&self) -> Option<u8> {
        match self.v {
            27 | 28 => Some(self.v - 27),
            _ => None,
        }
    }

    /// `r || s || v` as 65 raw bytes
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }

    /// RPC hex form, identical to [`concat_sig`]
    pub fn to_rpc_sig(&self) -> String {
        format!("0x{}{}{:x}", hex::encode(self.r), hex::encode(self.s), self.v)
    }
}

/// Concatenate signature components into RPC hex.
///
/// `r` and `s` are zero-padded on the left to 32 bytes each; `v` is written
/// in minimal hex.
pub fn concat_sig(v: u64, r: &[u8], s: &[u8]) -> SignerResult<String> {
    let r_word = to_unsigned_word(r)
        .map_err(|_| SignerError::malformed_signature(format!("r is {} bytes", r.len())))?;
    let s_word = to_unsigned_word(s)
        .map_err(|_| SignerError::malformed_signature(format!("s is {} bytes", s.len())))?;

    Ok(format!(
        "0x{}{}{:x}",
        hex::encode(r_word),
        hex::encode(s_word),
        v
    ))
}

/// Split an RPC hex signature into its components.
///
/// The decoded signature must be exactly 65 bytes. A v of 0 or 1 is
/// shifted to 27 or 28.
pub fn from_rpc_sig(sig: &str) -> SignerResult<SignatureParams> {
    let bytes = hex::decode(strip_hex_prefix(sig.trim()))
        .map_err(|e| SignerError::malformed_signature(format!("invalid hex: {}", e)))?;

    if bytes.len() != SIGNATURE_LENGTH {
        return Err(SignerError::malformed_signature(format!(
            "expected {} bytes, got {}",
            SIGNATURE_LENGTH,
            bytes.len()
        )));
    }

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..64]);

    let mut v = bytes[64];
    if v < 27 {
        v += 27;
    }

    Ok(SignatureParams::new(r, s, v))
}

mod hex_word {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(word: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(word)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)?;
        <[u8; 32]>::try_from(bytes.as_slice())
            .map_err(|_| serde::de::Error::custom(format!("expected 32 bytes, got {}", bytes.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_sig_layout() {
        let sig = concat_sig(27, &[0x11; 32], &[0x22; 32]).unwrap();
        assert_eq!(sig.len(), 2 + 130);
        assert_eq!(&sig[..4], "0x11");
        assert_eq!(&sig[66..68], "22");
        assert!(sig.ends_with("1b"));
    }

    #[test]
    fn test_concat_sig_short_components_are_padded() {
        let sig = concat_sig(28, &[0x01], &[0x7f, 0xff]).unwrap();
        assert_eq!(
            sig,
            format!("0x{}01{}7fff1c", "0".repeat(62), "0".repeat(60))
        );
    }

    #[test]
    fn test_concat_sig_high_bit_components_not_sign_extended() {
        let sig = concat_sig(27, &[0x80], &[0x01]).unwrap();
        assert_eq!(&sig[2..66], format!("{}80", "0".repeat(62)));
        assert_eq!(&sig[66..130], format!("{}01", "0".repeat(62)));
        assert!(sig.ends_with("1b"));

        // r with its leading zero byte stripped
        let mut r = [0u8; 32];
        r[1..].copy_from_slice(&[0xc3; 31]);
        let stripped = concat_sig(28, &r[1..], &[0x22; 32]).unwrap();
        assert_eq!(stripped, concat_sig(28, &r, &[0x22; 32]).unwrap());
        assert_eq!(from_rpc_sig(&stripped).unwrap().r, r);
    }

    #[test]
    fn test_concat_sig_minimal_v() {
        let sig = concat_sig(0, &[1; 32], &[2; 32]).unwrap();
        assert_eq!(sig.len(), 2 + 128 + 1);
        assert!(sig.ends_with('0'));

        let eip155 = concat_sig(37, &[1; 32], &[2; 32]).unwrap();
        assert!(eip155.ends_with("25"));
    }

    #[test]
    fn test_concat_sig_rejects_oversized() {
        assert!(matches!(
            concat_sig(27, &[0u8; 33], &[0u8; 32]),
            Err(SignerError::MalformedSignature(_))
        ));
    }

    #[test]
    fn test_from_rpc_sig() {
        let hex_sig = format!("0x{}{}1c", "ab".repeat(32), "cd".repeat(32));
        let params = from_rpc_sig(&hex_sig).unwrap();
        assert_eq!(params.r, [0xab; 32]);
        assert_eq!(params.s, [0xcd; 32]);
        assert_eq!(params.v, 28);
        assert_eq!(params.recovery_id(), Some(1));
        assert_eq!(params.to_rpc_sig(), hex_sig);
    }

    #[test]
    fn test_from_rpc_sig_normalizes_v() {
        let hex_sig = format!("{}{}00", "ab".repeat(32), "cd".repeat(32));
        assert_eq!(from_rpc_sig(&hex_sig).unwrap().v, 27);

        let hex_sig = format!("{}{}01", "ab".repeat(32), "cd".repeat(32));
        assert_eq!(from_rpc_sig(&hex_sig).unwrap().v, 28);
    }

    #[test]
    fn test_from_rpc_sig_wrong_length() {
        let short = format!("0x{}", "ab".repeat(64));
        assert!(matches!(
            from_rpc_sig(&short),
            Err(SignerError::MalformedSignature(_))
        ));
        assert!(matches!(
            from_rpc_sig("0xzz"),
            Err(SignerError::MalformedSignature(_))
        ));
    }

    #[test]
    fn test_to_bytes() {
        let params = SignatureParams::new([1; 32], [2; 32], 27);
        let bytes = params.to_bytes();
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[32], 2);
        assert_eq!(bytes[64], 27);
        assert_eq!(from_rpc_sig(&hex::encode(bytes)).unwrap(), params);
    }

    #[test]
    fn test_serde_hex_components() {
        let params = SignatureParams::new([0xaa; 32], [0xbb; 32], 28);
        let json = serde_json::to_value(params).unwrap();
        assert_eq!(json["r"], format!("0x{}", "aa".repeat(32)));
        assert_eq!(json["v"], 28);
        let back: SignatureParams = serde_json::from_value(json).unwrap();
        assert_eq!(back, params);
    }
}
