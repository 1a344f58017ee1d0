//! Unified error types for typed-data hashing, signing and recovery
//!
//! Every operation in the crate returns [`SignerResult`]. Errors are never
//! retried or swallowed; the one deliberate leniency is that struct encoding
//! skips fields absent from the instance.

use serde::{Deserialize, Serialize};

/// Main error type for all signer operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignerError {
    /// A schema reference cannot be resolved
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// A type the encoder deliberately does not handle (arrays)
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// Empty or malformed input (legacy typed-data list, hex payloads)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A value that cannot be encoded as its declared type
    #[error("Invalid value for type {type_name}: {value}")]
    InvalidValue { type_name: String, value: String },

    #[error("Malformed signature: {0}")]
    MalformedSignature(String),

    /// ECDSA recovery yields no valid curve point
    #[error("Signature recovery failed: {0}")]
    RecoveryFailure(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Type nesting exceeds the configured limit
    #[error("Schema too deep: nesting exceeds {limit} levels at {type_name}")]
    SchemaTooDeep { type_name: String, limit: usize },

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

impl SignerError {
    pub fn unknown_type(type_name: impl Into<String>) -> Self {
        Self::UnknownType(type_name.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_value(type_name: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidValue {
            type_name: type_name.into(),
            value: value.to_string(),
        }
    }

    pub fn malformed_signature(msg: impl Into<String>) -> Self {
        Self::MalformedSignature(msg.into())
    }

    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Self::TypeMismatch(msg.into())
    }

    /// Stable machine-readable category
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownType(_) => ErrorCode::UnknownType,
            Self::UnsupportedFeature(_) => ErrorCode::UnsupportedFeature,
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::InvalidValue { .. } => ErrorCode::InvalidValue,
            Self::MalformedSignature(_) => ErrorCode::MalformedSignature,
            Self::RecoveryFailure(_) => ErrorCode::RecoveryFailure,
            Self::TypeMismatch(_) => ErrorCode::TypeMismatch,
            Self::SchemaTooDeep { .. } => ErrorCode::SchemaTooDeep,
            Self::InvalidPrivateKey(_) => ErrorCode::InvalidPrivateKey,
            Self::InvalidJson(_) => ErrorCode::JsonError,
        }
    }
}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Schema errors
    UnknownType,
    UnsupportedFeature,
    SchemaTooDeep,

    // Input errors
    InvalidInput,
    InvalidValue,
    TypeMismatch,
    InvalidPrivateKey,

    // Signature errors
    MalformedSignature,
    RecoveryFailure,

    // Parse errors
    JsonError,
}

/// Result type alias for signer operations
pub type SignerResult<T> = Result<T, SignerError>;

// Conversions from common error types

impl From<serde_json::Error> for SignerError {
    fn from(e: serde_json::Error) -> Self {
        SignerError::InvalidJson(e.to_string())
    }
}

impl From<hex::FromHexError> for SignerError {
    fn from(e: hex::FromHexError) -> Self {
        SignerError::InvalidInput(format!("invalid hex: {}", e))
    }
}
