use crate::adapters::parsers::yaml_parser::YamlValuesParser;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::manifest_pipeline::ManifestPipeline;

/// Common key the resolved tag is stored under when `--tag` is given.
pub const IMAGE_TAG_KEY: &str = "IMAGE_TAG";

/// Execute the `runparcel generate` command.
///
/// Loads the values file and template, then writes one manifest per
/// environment into the output directory. Stops at the first failing
/// environment; files already generated are left in place.
pub fn execute(
    template: Option<&str>,
    values: Option<&str>,
    output_dir: Option<&str>,
    tag: Option<&str>,
) -> Result<()> {
    let config = crate::cli::context::app_config()?;
    let template_path = config.template_path(template);
    let values_path = config.values_path(values);
    let output_dir = config.output_dir(output_dir);

    let mut pipeline = ManifestPipeline::load(&values_path, &template_path, &YamlValuesParser)?;

    if let Some(user_tag) = tag {
        let resolved = super::tag::resolve(Some(user_tag), &config)?;
        pipeline.set_common(IMAGE_TAG_KEY, resolved.value);
    }

    output::header(&format!(
        "Generating {} environment(s) from {}",
        pipeline.values().environments.len(),
        template_path.display()
    ));

    let written = pipeline.write_all(&output_dir, |path| {
        output::success(&format!("Generated: {}", path.display()));
    })?;

    if written.is_empty() {
        output::warning(&format!(
            "No environments defined in {}; nothing generated",
            values_path.display()
        ));
    }

    Ok(())
}
