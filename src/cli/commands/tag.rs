use chrono::Local;

use crate::adapters::git::git_commit::GitCommitSource;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::models::resolved_tag::{ResolvedTag, TagSource};
use crate::core::services::tag_resolver::TagResolver;

/// Execute the `runparcel tag [TAG]` command.
///
/// Prints only the tag on stdout so it can be captured by scripts.
pub fn execute(user_tag: Option<&str>) -> Result<()> {
    let config = crate::cli::context::app_config()?;
    let tag = resolve(user_tag, &config)?;
    println!("{tag}");
    Ok(())
}

/// Resolve a tag against the repository in the working directory and
/// report where it came from.
pub fn resolve(user_tag: Option<&str>, config: &AppConfig) -> Result<ResolvedTag> {
    let commits = GitCommitSource::new(".").with_timeout(config.git_timeout());
    let today = Local::now().date_naive();
    let tag = TagResolver::new(&commits).resolve(user_tag, today)?;

    match tag.source {
        TagSource::User => output::info(&format!("Using provided tag: {tag}")),
        TagSource::Generated => output::info(&format!("No tag provided. Auto-generated tag: {tag}")),
    }

    Ok(tag)
}
