use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::core::errors::{Result, RunparcelError};
use crate::core::models::config_value::{ConfigValue, Mapping};
use crate::core::models::values_document::{ENVIRONMENTS_KEY, MergedConfig, ValuesDocument};

/// Environment names become file names (`<env>.yaml`), so they are kept
/// to a conservative character set and may not start with a dot.
static ENV_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9._-]*$").expect("valid regex"));

/// Splits a values document into common and per-environment halves and
/// merges them back together one environment at a time.
pub struct ConfigMerger;

impl ConfigMerger {
    /// Split the root mapping of a values file.
    ///
    /// Every top-level key except `environments` becomes part of the
    /// common block. `environments` must be a mapping whose values are
    /// mappings themselves; an empty override (`staging:` with no body)
    /// counts as an empty mapping.
    ///
    /// # Errors
    ///
    /// `SchemaError` if `environments` is missing or not a mapping, if an
    /// override is not a mapping, or if an environment name cannot be
    /// used as a file name.
    pub fn split(mut root: Mapping, source: &Path) -> Result<ValuesDocument> {
        let schema_err = |detail: String| RunparcelError::SchemaError {
            file: source.to_path_buf(),
            detail,
        };

        let raw_envs = match root.remove(ENVIRONMENTS_KEY) {
            Some(ConfigValue::Mapping(envs)) => envs,
            Some(other) => {
                return Err(schema_err(format!(
                    "top-level 'environments' key must be a mapping, found a {}",
                    other.kind()
                )));
            }
            None => {
                return Err(schema_err(
                    "top-level 'environments' key not found".to_string(),
                ));
            }
        };

        let mut environments = BTreeMap::new();
        for (name, value) in raw_envs {
            if !ENV_NAME.is_match(&name) {
                return Err(schema_err(format!(
                    "environment name '{name}' is not usable as a file name \
                     (letters, digits, '-', '_' and '.' only; no leading '.')"
                )));
            }
            let overrides = match value {
                ConfigValue::Mapping(m) => m,
                other => {
                    return Err(schema_err(format!(
                        "invalid configuration for environment {name}: expected a map, found a {}",
                        other.kind()
                    )));
                }
            };
            environments.insert(name, overrides);
        }

        debug!(
            common_keys = root.len(),
            environments = environments.len(),
            "split values document"
        );

        Ok(ValuesDocument {
            common: root,
            environments,
        })
    }

    /// Merge one environment's overrides on top of the common block.
    ///
    /// Shallow: an override key replaces the common value outright, even
    /// when both are mappings. Keys only in `common` are kept and keys
    /// only in `overrides` are added.
    pub fn merge_one(common: &Mapping, overrides: &Mapping) -> Mapping {
        let mut merged = common.clone();
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Merged configurations for every environment, in name order.
    ///
    /// Lazy: each `MergedConfig` is built only when the iterator reaches it.
    pub fn merged<'a>(doc: &'a ValuesDocument) -> impl Iterator<Item = MergedConfig> + 'a {
        doc.environments.iter().map(|(name, overrides)| {
            debug!(environment = %name, override_keys = overrides.len(), "merging environment");
            MergedConfig {
                environment: name.clone(),
                values: Self::merge_one(&doc.common, overrides),
            }
        })
    }
}
