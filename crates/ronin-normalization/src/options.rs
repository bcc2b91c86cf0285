//! Normalization configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Toggles for [`StandardNormalizer`](crate::StandardNormalizer).
///
/// Deserializes from a partial document; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationOptions {
    /// Rewrite well-known `urn:oid:` code systems to their canonical URIs.
    pub canonical_systems: bool,
    /// Apply the same rewrite to `Identifier.system`.
    pub identifier_systems: bool,
    /// Trim surrounding whitespace from coding systems and codes.
    pub trim_codings: bool,
    /// Additional system aliases, checked before the built-in table.
    pub system_aliases: BTreeMap<String, String>,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            canonical_systems: true,
            identifier_systems: true,
            trim_codings: true,
            system_aliases: BTreeMap::new(),
        }
    }
}

impl NormalizationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canonical_systems(mut self, enabled: bool) -> Self {
        self.canonical_systems = enabled;
        self
    }

    pub fn with_identifier_systems(mut self, enabled: bool) -> Self {
        self.identifier_systems = enabled;
        self
    }

    pub fn with_trim_codings(mut self, enabled: bool) -> Self {
        self.trim_codings = enabled;
        self
    }

    pub fn with_system_alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.system_aliases.insert(from.into(), to.into());
        self
    }
}
