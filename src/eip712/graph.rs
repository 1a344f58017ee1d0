//! EIP-712 Type Graph
//!
//! Resolves the struct types a type depends on and builds its canonical
//! `encodeType` string.

use super::types::*;
use crate::config::DEFAULT_MAX_TYPE_DEPTH;
use crate::error::{SignerError, SignerResult};
use crate::log_debug;
use crate::utils::crypto::keccak256;
use std::collections::HashSet;

/// Find all type dependencies of `root`, including `root` itself.
///
/// Traversal is depth-first in field declaration order. The result holds each
/// struct type once, in discovery order, with `root` first.
pub fn find_type_dependencies(root: &str, schema: &Schema) -> SignerResult<Vec<String>> {
    find_type_dependencies_with_limit(root, schema, DEFAULT_MAX_TYPE_DEPTH)
}

/// [`find_type_dependencies`] with an explicit nesting limit
pub fn find_type_dependencies_with_limit(
    root: &str,
    schema: &Schema,
    max_depth: usize,
) -> SignerResult<Vec<String>> {
    let mut visited = HashSet::new();
    let mut ordered = Vec::new();
    visit(root, schema, &mut visited, &mut ordered, 1, max_depth)?;
    Ok(ordered)
}

fn visit(
    type_name: &str,
    schema: &Schema,
    visited: &mut HashSet<String>,
    ordered: &mut Vec<String>,
    depth: usize,
    max_depth: usize,
) -> SignerResult<()> {
    if !visited.insert(type_name.to_string()) {
        return Ok(());
    }
    if depth > max_depth {
        log_debug!("eip712", "type graph exceeds depth limit", type_name = type_name, limit = max_depth);
        return Err(SignerError::SchemaTooDeep {
            type_name: type_name.to_string(),
            limit: max_depth,
        });
    }
    ordered.push(type_name.to_string());

    if let Some(fields) = schema.get(type_name) {
        for field in fields {
            let dep = base_type(&field.type_name);
            if schema.contains_key(dep) {
                visit(dep, schema, visited, ordered, depth + 1, max_depth)?;
            }
        }
    }

    Ok(())
}

/// Encode a type string for a struct type
/// Format: "TypeName(type1 name1,type2 name2,...)" followed by every
/// dependency in ascending name order.
pub fn encode_type(root: &str, schema: &Schema) -> SignerResult<String> {
    encode_type_with_limit(root, schema, DEFAULT_MAX_TYPE_DEPTH)
}

/// [`encode_type`] with an explicit nesting limit
pub fn encode_type_with_limit(root: &str, schema: &Schema, max_depth: usize) -> SignerResult<String> {
    let mut deps = find_type_dependencies_with_limit(root, schema, max_depth)?;

    let mut others = deps.split_off(1);
    others.sort();
    deps.extend(others);

    let mut result = String::new();
    for dep in &deps {
        let fields = schema
            .get(dep)
            .ok_or_else(|| SignerError::unknown_type(dep))?;
        result.push_str(&format_type_string(dep, fields));
    }

    Ok(result)
}

/// Format a single type string
fn format_type_string(type_name: &str, fields: &[TypedDataField]) -> String {
    let field_strs: Vec<String> = fields
        .iter()
        .map(|f| format!("{} {}", f.type_name, f.name))
        .collect();

    format!("{}({})", type_name, field_strs.join(","))
}

/// Calculate the type hash for a struct type
/// typeHash = keccak256(encodeType(typeOf(s)))
pub fn hash_type(root: &str, schema: &Schema) -> SignerResult<[u8; 32]> {
    hash_type_with_limit(root, schema, DEFAULT_MAX_TYPE_DEPTH)
}

/// [`hash_type`] with an explicit nesting limit
pub fn hash_type_with_limit(root: &str, schema: &Schema, max_depth: usize) -> SignerResult<[u8; 32]> {
    let encoded = encode_type_with_limit(root, schema, max_depth)?;
    Ok(keccak256(encoded.as_bytes()))
}
