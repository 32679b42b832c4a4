use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::errors::{Result, RunparcelError, first_line};

/// Default project configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "runparcel.toml";

/// Default template path when neither flag nor config sets one.
pub const DEFAULT_TEMPLATE: &str = "cloudrun/run.yaml.tmpl";

/// Default values file.
pub const DEFAULT_VALUES: &str = "values.yaml";

/// Default directory for rendered manifests.
pub const DEFAULT_OUTPUT_DIR: &str = "deploy";

/// Optional project configuration read from `runparcel.toml`.
///
/// Every field is optional; command-line flags take precedence and
/// built-in defaults fill whatever is left.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub generate: GenerateSection,
    #[serde(default)]
    pub tag: TagSection,
}

impl AppConfig {
    /// Load the project configuration.
    ///
    /// With `explicit = true` the file must exist. Otherwise a missing
    /// file yields the default configuration.
    pub fn load(path: &Path, explicit: bool) -> Result<Self> {
        if !path.exists() {
            if explicit {
                return Err(RunparcelError::InvalidConfig {
                    detail: format!("config file {} not found", path.display()),
                });
            }
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| RunparcelError::InvalidConfig {
            detail: format!("Failed to parse {}: {}", path.display(), first_line(&e.to_string())),
        })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.tag.git_timeout_secs == Some(0) {
            return Err(RunparcelError::InvalidConfig {
                detail: format!("{}: [tag] git_timeout_secs must be at least 1", path.display()),
            });
        }
        Ok(())
    }

    /// Template path: flag, then config, then `cloudrun/run.yaml.tmpl`.
    pub fn template_path(&self, flag: Option<&str>) -> PathBuf {
        pick(flag, self.generate.template.as_deref(), DEFAULT_TEMPLATE)
    }

    /// Values path: flag, then config, then `values.yaml`.
    pub fn values_path(&self, flag: Option<&str>) -> PathBuf {
        pick(flag, self.generate.values.as_deref(), DEFAULT_VALUES)
    }

    /// Output directory: flag, then config, then `deploy`.
    pub fn output_dir(&self, flag: Option<&str>) -> PathBuf {
        pick(flag, self.generate.output_dir.as_deref(), DEFAULT_OUTPUT_DIR)
    }

    /// Upper bound for the `git rev-parse HEAD` call.
    pub fn git_timeout(&self) -> Duration {
        self.tag
            .git_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(crate::adapters::git::git_commit::DEFAULT_GIT_TIMEOUT)
    }
}

fn pick(flag: Option<&str>, configured: Option<&str>, default: &str) -> PathBuf {
    PathBuf::from(flag.or(configured).unwrap_or(default))
}

/// The `[generate]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateSection {
    pub template: Option<String>,
    pub values: Option<String>,
    pub output_dir: Option<String>,
}

/// The `[tag]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagSection {
    pub git_timeout_secs: Option<u64>,
}
