//! EIP-712 Typed Data Signing
//!
//! Implementation of EIP-712 typed structured data hashing and signing.
//! Used for secure, human-readable signing requests in dApps.
//!
//! # Reference
//! - <https://eips.ethereum.org/EIPS/eip-712>
//!
//! # Example
//! ```rust,ignore
//! use eth_typed_signer::eip712::{TypedData, hash_typed_data, sign_typed_data};
//!
//! let typed_data = TypedData::from_json(json_string)?;
//! let hash = hash_typed_data(&typed_data)?;
//! let signature = sign_typed_data(&typed_data, &private_key)?;
//! ```

pub mod types;
pub mod graph;
pub mod encoder;
pub mod hasher;
pub mod legacy;
pub mod signer;

pub use types::*;
pub use graph::*;
pub use encoder::*;
pub use hasher::*;
pub use legacy::*;
pub use signer::*;
