use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::config::app_config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::core::errors::Result;

/// Path of the project config and whether the user named it explicitly.
static CONFIG_PATH: OnceLock<(PathBuf, bool)> = OnceLock::new();

/// Initialize the global project config path.
/// If `custom` is provided, uses that path; otherwise defaults to `runparcel.toml`.
pub fn init(custom: Option<&str>) {
    let entry = match custom {
        Some(path) => (PathBuf::from(path), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    let _ = CONFIG_PATH.set(entry);
}

/// Get the current project config path.
pub fn config_path() -> &'static Path {
    CONFIG_PATH
        .get()
        .map(|(p, _)| p.as_path())
        .unwrap_or(Path::new(DEFAULT_CONFIG_FILE))
}

/// Load the project config from the path set by `init`.
pub fn app_config() -> Result<AppConfig> {
    let explicit = CONFIG_PATH.get().is_some_and(|(_, explicit)| *explicit);
    AppConfig::load(config_path(), explicit)
}
