use crate::core::errors::{Result, RunparcelError};
use crate::core::models::values_document::MergedConfig;

/// Keys every merged environment must define as non-empty strings.
pub const MANDATORY_KEYS: &[&str] = &["IMAGE_REGISTRY", "SERVICE_NAME"];

/// Checks merged configurations for mandatory keys.
pub struct Validator;

impl Validator {
    /// Validate `merged` against `mandatory_keys`, in order.
    ///
    /// A key passes when it is present, holds a string, and that string is
    /// not empty. Whitespace-only strings pass. Stops at the first failing
    /// key.
    pub fn validate(&self, merged: &MergedConfig, mandatory_keys: &[&str]) -> Result<()> {
        for key in mandatory_keys {
            match merged.get_str(key) {
                Some(value) if !value.is_empty() => {}
                _ => {
                    return Err(RunparcelError::MissingKey {
                        key: key.to_string(),
                        environment: merged.environment.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
