//! ABI (Application Binary Interface) module for Solidity elementary types
//!
//! This module provides the primitive encodings the signer needs:
//! - Type name parsing with Solidity aliases (`uint`, `int`, `byte`)
//! - Single-word head encoding for EIP-712 struct fields
//! - Tight packing (`abi.encodePacked`) for legacy typed data

pub mod types;
pub mod encoder;

pub use types::*;
pub use encoder::*;
