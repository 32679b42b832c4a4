use std::collections::BTreeMap;

use super::config_value::Mapping;

/// Top-level key that holds the per-environment overrides.
pub const ENVIRONMENTS_KEY: &str = "environments";

/// A loaded values file, already split into its two halves.
///
/// `common` holds every top-level key except `environments`; each entry
/// of `environments` is the override mapping for one environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuesDocument {
    pub common: Mapping,
    pub environments: BTreeMap<String, Mapping>,
}

impl ValuesDocument {
    /// Environment names in processing order.
    pub fn environment_names(&self) -> Vec<&str> {
        self.environments.keys().map(String::as_str).collect()
    }
}

/// The merged configuration for a single environment.
///
/// Built fresh for each environment and dropped once its manifest has
/// been rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedConfig {
    pub environment: String,
    pub values: Mapping,
}

impl MergedConfig {
    /// Returns the string value for `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_str())
    }
}
