use crate::adapters::parsers::yaml_parser::YamlValuesParser;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::manifest_pipeline::ManifestPipeline;

/// Execute the `runparcel check` command.
///
/// Runs the whole generate pipeline in memory: every environment is
/// merged, validated and rendered, but nothing is written to disk.
pub fn execute(template: Option<&str>, values: Option<&str>) -> Result<()> {
    let config = crate::cli::context::app_config()?;
    let template_path = config.template_path(template);
    let values_path = config.values_path(values);

    let pipeline = ManifestPipeline::load(&values_path, &template_path, &YamlValuesParser)?;

    output::header("🔍 runparcel check");
    output::success(&format!(
        "Environments in {}: {}",
        values_path.display(),
        pipeline.values().environment_names().join(", ")
    ));

    let mut checked = 0;
    for manifest in pipeline.render_all() {
        let manifest = manifest?;
        output::success(&format!(
            "{}: OK ({} bytes)",
            manifest.environment,
            manifest.contents.len()
        ));
        checked += 1;
    }

    output::success(&format!("{checked} environment(s) ready to generate"));
    Ok(())
}
