use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::errors::Result;
use crate::core::models::config_value::ConfigValue;
use crate::core::models::values_document::ValuesDocument;
use crate::core::services::config_merger::ConfigMerger;
use crate::core::services::template_renderer::{self, CompiledTemplate};
use crate::core::services::validator::{MANDATORY_KEYS, Validator};
use crate::core::services::values_loader::ValuesLoader;
use crate::core::traits::parser::ValuesParser;

/// One environment's rendered manifest, not yet written anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedManifest {
    pub environment: String,
    pub contents: String,
}

/// Values and template loaded once, ready to render every environment.
///
/// Environments are processed one at a time in name order. The first
/// failure stops the run; manifests already written stay on disk.
pub struct ManifestPipeline {
    values: ValuesDocument,
    template: CompiledTemplate,
}

impl ManifestPipeline {
    /// Load the values file, then compile the template.
    ///
    /// The values file is read first, so a broken values file is reported
    /// even when the template is also missing.
    pub fn load(values_path: &Path, template_path: &Path, parser: &dyn ValuesParser) -> Result<Self> {
        let values = ValuesLoader::new(parser).load(values_path)?;
        let template = CompiledTemplate::from_file(template_path)?;
        debug!(
            template = template.name(),
            environments = values.environments.len(),
            "pipeline ready"
        );
        Ok(Self::new(values, template))
    }

    pub fn new(values: ValuesDocument, template: CompiledTemplate) -> Self {
        Self { values, template }
    }

    pub fn values(&self) -> &ValuesDocument {
        &self.values
    }

    /// Add (or replace) a common value before rendering, e.g. `IMAGE_TAG`.
    ///
    /// Environments that define the same key keep their own value.
    pub fn set_common(&mut self, key: &str, value: impl Into<ConfigValue>) {
        self.values.common.insert(key.to_string(), value.into());
    }

    /// Merge, validate and render each environment in turn.
    ///
    /// Lazy: an environment is only merged once the previous one has been
    /// consumed, so a caller stopping at the first error never touches the
    /// remaining environments.
    pub fn render_all(&self) -> impl Iterator<Item = Result<RenderedManifest>> + '_ {
        ConfigMerger::merged(&self.values).map(|merged| -> Result<RenderedManifest> {
            Validator.validate(&merged, MANDATORY_KEYS)?;
            let contents = self.template.render(&merged)?;
            Ok(RenderedManifest {
                environment: merged.environment,
                contents,
            })
        })
    }

    /// Render every environment into `output_dir`, creating it if needed.
    ///
    /// `on_written` is called after each file lands on disk. Returns all
    /// paths written, in order.
    pub fn write_all(
        &self,
        output_dir: &Path,
        mut on_written: impl FnMut(&Path),
    ) -> Result<Vec<PathBuf>> {
        template_renderer::ensure_output_dir(output_dir)?;

        let mut written = Vec::new();
        for manifest in self.render_all() {
            let manifest = manifest?;
            let path =
                template_renderer::write_manifest(output_dir, &manifest.environment, &manifest.contents)?;
            on_written(&path);
            written.push(path);
        }
        debug!(count = written.len(), dir = %output_dir.display(), "manifests written");
        Ok(written)
    }
}
