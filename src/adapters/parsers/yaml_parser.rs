use std::path::Path;

use serde_yaml::Value;

use crate::core::errors::{Result, RunparcelError, first_line};
use crate::core::models::config_value::{ConfigValue, Mapping};
use crate::core::traits::parser::ValuesParser;

/// Parses YAML values files.
///
/// - Any nesting of mappings, sequences and scalars
/// - Scalar mapping keys (numbers, booleans) are kept as their string form;
///   two keys with the same string form (`1` and `"1"`) are rejected
/// - YAML tags (`!foo value`) are dropped, the tagged value is kept
/// - An empty document is treated as an empty mapping
pub struct YamlValuesParser;

impl YamlValuesParser {
    fn convert(value: Value, source: &Path) -> Result<ConfigValue> {
        Ok(match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(b) => ConfigValue::Bool(b),
            Value::Number(n) => ConfigValue::Number(n),
            Value::String(s) => ConfigValue::String(s),
            Value::Sequence(items) => ConfigValue::Sequence(
                items
                    .into_iter()
                    .map(|item| Self::convert(item, source))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Mapping(map) => ConfigValue::Mapping(Self::convert_mapping(map, source)?),
            Value::Tagged(tagged) => Self::convert(tagged.value, source)?,
        })
    }

    fn convert_mapping(map: serde_yaml::Mapping, source: &Path) -> Result<Mapping> {
        let mut out = Mapping::new();
        for (key, value) in map {
            let key = Self::key_to_string(key, source)?;
            if out.contains_key(&key) {
                return Err(RunparcelError::SchemaError {
                    file: source.to_path_buf(),
                    detail: format!("duplicate mapping key '{key}' after converting keys to strings"),
                });
            }
            out.insert(key, Self::convert(value, source)?);
        }
        Ok(out)
    }

    fn key_to_string(key: Value, source: &Path) -> Result<String> {
        match key {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Tagged(tagged) => Self::key_to_string(tagged.value, source),
            other => Err(RunparcelError::SchemaError {
                file: source.to_path_buf(),
                detail: format!("mapping keys must be scalars, found {other:?}"),
            }),
        }
    }
}

impl ValuesParser for YamlValuesParser {
    fn parse(&self, content: &str, source: &Path) -> Result<Mapping> {
        let root: Value =
            serde_yaml::from_str(content).map_err(|e| RunparcelError::ParseError {
                file: source.to_path_buf(),
                detail: first_line(&e.to_string()).to_string(),
            })?;

        match Self::convert(root, source)? {
            ConfigValue::Mapping(map) => Ok(map),
            ConfigValue::Null => Ok(Mapping::new()),
            other => Err(RunparcelError::SchemaError {
                file: source.to_path_buf(),
                detail: format!("the document root must be a mapping, found a {}", other.kind()),
            }),
        }
    }

    fn supported_extensions(&self) -> &[&str] {
        &[".yaml", ".yml"]
    }
}
