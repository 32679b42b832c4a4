use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use tracing::debug;

use crate::core::errors::{Result, RunparcelError, first_line};
use crate::core::models::values_document::MergedConfig;

/// Extension given to every rendered manifest.
pub const MANIFEST_EXTENSION: &str = "yaml";

/// A template compiled once and rendered for any number of environments.
///
/// Templates use Handlebars syntax: `{{KEY}}`, `{{a.b}}`,
/// `{{#if KEY}}...{{else}}...{{/if}}`, `{{#each LIST}}{{this}}{{/each}}`
/// and `{{#with MAP}}...{{/with}}`. Strict mode is on, so referencing a
/// key the environment does not define is an error rather than an empty
/// string. Output is not HTML-escaped.
pub struct CompiledTemplate {
    name: String,
    registry: Handlebars<'static>,
}

impl CompiledTemplate {
    /// Compile `source`. `name` labels errors (usually the file name).
    ///
    /// # Errors
    ///
    /// `TemplateSyntax` for unclosed blocks or malformed expressions.
    pub fn parse(name: &str, source: &str) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(name, source)
            .map_err(|e| {
                let detail = e.to_string();
                debug!(template = name, "{detail}");
                RunparcelError::TemplateSyntax {
                    template: name.to_string(),
                    detail: first_line(&detail).to_string(),
                }
            })?;
        debug!(template = name, bytes = source.len(), "compiled template");

        Ok(Self {
            name: name.to_string(),
            registry,
        })
    }

    /// Read and compile the template file at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RunparcelError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let source = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::parse(&name, &source)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template against one environment's merged values.
    ///
    /// # Errors
    ///
    /// `TemplateExecution` if the template references a missing key or a
    /// block helper is given the wrong kind of value.
    pub fn render(&self, config: &MergedConfig) -> Result<String> {
        self.registry
            .render(&self.name, &config.values)
            .map_err(|e| {
                let detail = e.to_string();
                debug!(environment = %config.environment, "{detail}");
                RunparcelError::TemplateExecution {
                    environment: config.environment.clone(),
                    detail: first_line(&detail).to_string(),
                }
            })
    }
}

/// Create `dir` (and its parents) if it does not exist yet.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| RunparcelError::OutputDir {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Path of the manifest for `environment` inside `dir`.
pub fn manifest_path(dir: &Path, environment: &str) -> PathBuf {
    dir.join(format!("{environment}.{MANIFEST_EXTENSION}"))
}

/// Write a rendered manifest, replacing any previous file for the
/// environment. Returns the path written.
pub fn write_manifest(dir: &Path, environment: &str, contents: &str) -> Result<PathBuf> {
    let path = manifest_path(dir, environment);
    std::fs::write(&path, contents)?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote manifest");
    Ok(path)
}
