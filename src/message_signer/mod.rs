//! Message Signing Module
//!
//! Personal message signing for Ethereum accounts (EIP-191 `personal_sign`).
//! Recovery of personal-message signers lives in [`crate::recovery`].

pub mod ethereum;

pub use ethereum::{personal_sign, personal_sign_bytes, personal_sign_hash, personal_sign_hex};
