//! EIP-712 Type Definitions
//!
//! Core data structures for EIP-712 typed data and legacy typed messages.

use crate::abi::is_elementary_type;
use crate::error::{SignerError, SignerResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Name of the struct type describing the signing domain
pub const DOMAIN_TYPE: &str = "EIP712Domain";

/// A field in a struct type definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypedDataField {
    /// The name of the field
    pub name: String,
    /// The type of the field (e.g., "address", "uint256", "Person")
    #[serde(rename = "type")]
    pub type_name: String,
}

impl TypedDataField {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Struct type name -> fields in declaration order
pub type Schema = BTreeMap<String, Vec<TypedDataField>>;

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Complete EIP-712 typed data structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypedData {
    /// Type definitions (struct name -> fields)
    pub types: Schema,

    /// The name of the primary type being signed
    pub primary_type: String,

    /// The EIP712Domain instance
    #[serde(default = "empty_object")]
    pub domain: Value,

    /// The actual message data to sign
    #[serde(default = "empty_object")]
    pub message: Value,
}

impl TypedData {
    /// Parse typed data from a JSON string
    pub fn from_json(json: &str) -> SignerResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::sanitize(&value)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> SignerResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Keep only `types`, `primaryType`, `domain` and `message`; every other
    /// top-level key is dropped.
    pub fn sanitize(value: &Value) -> SignerResult<Self> {
        let obj = value.as_object().ok_or_else(|| {
            SignerError::type_mismatch(format!("typed data must be an object, got {}", value))
        })?;

        let mut sanitized = Map::new();
        for key in ["types", "primaryType", "domain", "message"] {
            if let Some(v) = obj.get(key) {
                sanitized.insert(key.to_string(), v.clone());
            }
        }

        Ok(serde_json::from_value(Value::Object(sanitized))?)
    }

    /// Validate the typed data structure
    pub fn validate(&self) -> SignerResult<()> {
        if !self.types.contains_key(DOMAIN_TYPE) {
            return Err(SignerError::unknown_type(DOMAIN_TYPE));
        }
        if !self.types.contains_key(&self.primary_type) {
            return Err(SignerError::unknown_type(&self.primary_type));
        }
        validate_schema(&self.types)
    }
}

/// Check every field type is either elementary or a struct in the schema
pub fn validate_schema(schema: &Schema) -> SignerResult<()> {
    for fields in schema.values() {
        for field in fields {
            let base = base_type(&field.type_name);
            if !is_elementary_type(base) && !schema.contains_key(base) {
                return Err(SignerError::unknown_type(&field.type_name));
            }
        }
    }
    Ok(())
}

/// Get the base type from a potentially array type
/// e.g., "Person[]" -> "Person", "uint256[10]" -> "uint256"
pub fn base_type(type_name: &str) -> &str {
    match type_name.find('[') {
        Some(bracket_pos) => &type_name[..bracket_pos],
        None => type_name,
    }
}

/// One entry of a legacy (pre-EIP-712) typed message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegacyTypedField {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub value: Value,
}

impl LegacyTypedField {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            value,
        }
    }
}
