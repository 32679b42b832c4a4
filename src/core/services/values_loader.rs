use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::core::errors::{Result, RunparcelError};
use crate::core::models::values_document::ValuesDocument;
use crate::core::services::config_merger::ConfigMerger;
use crate::core::traits::parser::ValuesParser;

/// Reads a values file from disk and turns it into a `ValuesDocument`.
pub struct ValuesLoader<'a> {
    parser: &'a dyn ValuesParser,
}

impl<'a> ValuesLoader<'a> {
    pub fn new(parser: &'a dyn ValuesParser) -> Self {
        Self { parser }
    }

    /// Load and split the values file at `path`.
    ///
    /// # Errors
    ///
    /// - `FileNotFound` / `Io` if the file cannot be read.
    /// - `ParseError` if the content is not valid for the parser.
    /// - `SchemaError` if the `environments` block is missing or malformed.
    pub fn load(&self, path: &Path) -> Result<ValuesDocument> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RunparcelError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => RunparcelError::Io(e),
        })?;
        debug!(path = %path.display(), bytes = content.len(), "read values file");

        let name = path.to_string_lossy();
        if !self
            .parser
            .supported_extensions()
            .iter()
            .any(|ext| name.ends_with(ext))
        {
            warn!(path = %path.display(), "values file has an unexpected extension, parsing anyway");
        }

        let root = self.parser.parse(&content, path)?;
        ConfigMerger::split(root, path)
    }
}
