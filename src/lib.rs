//! Ethereum Typed Data Signer
//!
//! Hashing, signing and signer recovery for Ethereum typed data.
//!
//! # Architecture
//!
//! This crate provides:
//! - **eip712**: Type graph, struct encoding and the `\x19\x01` signing hash,
//!   plus the legacy (pre-712) typed-data hash
//! - **message_signer**: EIP-191 `personal_sign`
//! - **signature**: `(v, r, s)` <-> 65-byte RPC hex
//! - **recovery**: Public key and address recovery for every hash path
//! - **abi**: Solidity elementary type parsing, word encoding and tight packing
//! - **config**: Depth limits and logging switches
//!
//! Every operation is a pure function of its inputs. The only process-wide
//! state is the debug-logging flag.
//!
//! # Example
//!
//! ```rust,ignore
//! use eth_typed_signer::{TypedData, hash_typed_data, sign_typed_data, recover_typed_signature};
//!
//! let typed_data = TypedData::from_json(json_string)?;
//! let hash = hash_typed_data(&typed_data)?;
//! let signature = sign_typed_data(&typed_data, &private_key)?;
//! let signer = recover_typed_signature(&typed_data, &signature)?;
//! ```

pub mod error;
pub mod config;
pub mod utils;
pub mod abi;
pub mod eip712;
pub mod message_signer;
pub mod signature;
pub mod recovery;

// Re-export key types for convenience
pub use error::{ErrorCode, SignerError, SignerResult};
pub use config::SignerConfig;

pub use eip712::{
    domain_separator, domain_separator_with_config, encode_data, encode_type, find_type_dependencies, get_pre_image,
    hash_struct, hash_type, hash_typed_data, hash_typed_data_value, hash_typed_data_with_config,
    sign_hash, sign_typed_data, sign_typed_data_legacy, sign_typed_data_with_config,
    typed_signature_hash, typed_signature_hash_buffer, Eip712PreImage, LegacyTypedField, Schema,
    TypedData, TypedDataField,
};
pub use message_signer::{personal_sign, personal_sign_hash};
pub use recovery::{
    extract_public_key, private_to_address, public_to_address, recover_address,
    recover_personal_signature, recover_public_key, recover_typed_signature,
    recover_typed_signature_legacy, recover_typed_signature_with_config,
};
pub use signature::{concat_sig, from_rpc_sig, SignatureParams};

// Re-export hashing and hex utilities
pub use utils::bytes::{normalize, to_buffer};
pub use utils::crypto::{keccak256, to_checksum_address};
