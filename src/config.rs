//! Signer Configuration
//!
//! Limits and switches for the hashing pipeline:
//! - Presets (standard, strict)
//! - Environment overrides
//! - Validation of settings
//!
//! Configuration is a plain value handed to the `*_with_config` entry points.

use crate::error::{SignerError, SignerResult};

/// Environment variable overriding [`SignerConfig::max_type_depth`]
pub const ENV_MAX_DEPTH: &str = "TYPED_SIGNER_MAX_DEPTH";

/// Environment variable enabling debug logging (`1`, `true`, `yes`)
pub const ENV_DEBUG: &str = "TYPED_SIGNER_DEBUG";

/// Default nesting limit for struct types
pub const DEFAULT_MAX_TYPE_DEPTH: usize = 32;

/// Settings for typed-data hashing and signing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerConfig {
    /// Maximum struct nesting depth before `SchemaTooDeep`
    pub max_type_depth: usize,
    /// Emit debug log entries
    pub debug_logging: bool,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl SignerConfig {
    /// Standard preset, deep enough for any real-world schema
    pub fn standard() -> Self {
        Self {
            max_type_depth: DEFAULT_MAX_TYPE_DEPTH,
            debug_logging: false,
        }
    }

    /// Strict preset for untrusted, dapp-supplied payloads
    pub fn strict() -> Self {
        Self {
            max_type_depth: 8,
            debug_logging: false,
        }
    }

    /// Standard preset overlaid with the process environment
    pub fn from_env() -> SignerResult<Self> {
        Self::standard().with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from a key lookup onto this config
    pub fn with_overrides<F>(mut self, lookup: F) -> SignerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_MAX_DEPTH) {
            self.max_type_depth = raw.trim().parse().map_err(|_| {
                SignerError::invalid_input(format!("{} must be an integer, got {:?}", ENV_MAX_DEPTH, raw))
            })?;
        }
        if let Some(raw) = lookup(ENV_DEBUG) {
            self.debug_logging = matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }
        self.validate()?;
        Ok(self)
    }

    pub fn with_max_type_depth(mut self, depth: usize) -> Self {
        self.max_type_depth = depth;
        self
    }

    /// Validate settings consistency
    pub fn validate(&self) -> SignerResult<()> {
        if self.max_type_depth == 0 {
            return Err(SignerError::invalid_input(
                "max_type_depth must be at least 1",
            ));
        }
        Ok(())
    }

    /// Apply the logging switch to the global logger
    pub fn apply_logging(&self) {
        if self.debug_logging {
            crate::utils::logging::enable_debug();
        } else {
            crate::utils::logging::disable_debug();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_presets() {
        assert_eq!(SignerConfig::default(), SignerConfig::standard());
        assert_eq!(SignerConfig::standard().max_type_depth, DEFAULT_MAX_TYPE_DEPTH);
        assert!(SignerConfig::strict().max_type_depth < DEFAULT_MAX_TYPE_DEPTH);
    }

    #[test]
    fn test_overrides() {
        let config = SignerConfig::standard()
            .with_overrides(lookup(&[(ENV_MAX_DEPTH, "12"), (ENV_DEBUG, "true")]))
            .unwrap();
        assert_eq!(config.max_type_depth, 12);
        assert!(config.debug_logging);
    }

    #[test]
    fn test_overrides_absent_keep_preset() {
        let config = SignerConfig::strict().with_overrides(lookup(&[])).unwrap();
        assert_eq!(config, SignerConfig::strict());
    }

    #[test]
    fn test_invalid_depth_rejected() {
        let err = SignerConfig::standard()
            .with_overrides(lookup(&[(ENV_MAX_DEPTH, "deep")]))
            .unwrap_err();
        assert!(matches!(err, SignerError::InvalidInput(_)));

        let err = SignerConfig::standard()
            .with_overrides(lookup(&[(ENV_MAX_DEPTH, "0")]))
            .unwrap_err();
        assert!(matches!(err, SignerError::InvalidInput(_)));
    }

    #[test]
    fn test_apply_logging_toggles_debug_flag() {
        let mut config = SignerConfig::default();
        config.debug_logging = true;
        config.apply_logging();
        assert!(crate::utils::logging::is_debug_enabled());

        config.debug_logging = false;
        config.apply_logging();
        assert!(!crate::utils::logging::is_debug_enabled());
    }
}
