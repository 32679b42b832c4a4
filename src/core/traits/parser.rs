use std::path::Path;

use crate::core::errors::Result;
use crate::core::models::config_value::Mapping;

/// Port for parsing a values file into its root mapping.
///
/// Only `YamlValuesParser` ships today; splitting the root into common
/// and per-environment halves is done by `ConfigMerger::split`.
pub trait ValuesParser {
    /// Parse raw file content into the document's root mapping.
    ///
    /// `source` is only used to label errors.
    fn parse(&self, content: &str, source: &Path) -> Result<Mapping>;

    /// File extensions this parser handles (e.g. `[".yaml"]`).
    fn supported_extensions(&self) -> &[&str];
}
