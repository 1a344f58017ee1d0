//! Utilities Module
//!
//! Byte codecs, hashing primitives and logging used across the crate.

pub mod bytes;
pub mod crypto;
pub mod logging;

pub use bytes::*;
pub use crypto::*;
