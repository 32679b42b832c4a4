use std::collections::BTreeMap;

use serde::Serialize;

/// A string-keyed mapping of configuration values.
///
/// Sorted by key, so anything iterating a mapping (environments in
/// particular) sees the same order on every run.
pub type Mapping = BTreeMap<String, ConfigValue>;

/// One node of a parsed values document.
///
/// Serializes untagged, so a `Mapping` can be handed straight to the
/// template engine as its data context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Number(serde_yaml::Number),
    String(String),
    Sequence(Vec<ConfigValue>),
    Mapping(Mapping),
}

impl ConfigValue {
    /// Returns the string payload, or `None` for any other variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short human name of the variant, used in schema error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Number(_) => "number",
            ConfigValue::String(_) => "string",
            ConfigValue::Sequence(_) => "sequence",
            ConfigValue::Mapping(_) => "mapping",
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}
