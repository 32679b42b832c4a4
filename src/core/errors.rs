use std::path::PathBuf;

/// All domain errors for runparcel.
///
/// Each variant carries the file or environment it relates to, so the
/// single-line `Error: ...` printed by `main` is enough to act on.
#[derive(Debug, thiserror::Error)]
pub enum RunparcelError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Parse error in {file}: {detail}")]
    ParseError { file: PathBuf, detail: String },

    #[error("Invalid values file {file}: {detail}")]
    SchemaError { file: PathBuf, detail: String },

    #[error(
        "mandatory key '{key}' not found or is empty for environment '{environment}' \
         (after merging values)"
    )]
    MissingKey { key: String, environment: String },

    #[error(
        "Template syntax error in {template}: {detail} \
         (templates use Handlebars syntax: {{{{REGION}}}}, not {{{{.REGION}}}})"
    )]
    TemplateSyntax { template: String, detail: String },

    #[error("Template execution failed for environment '{environment}': {detail}")]
    TemplateExecution { environment: String, detail: String },

    #[error("Cannot create output directory {path}: {reason}")]
    OutputDir { path: PathBuf, reason: String },

    #[error("Failed to get git commit hash for auto-tagging: {reason}")]
    Vcs { reason: String },

    #[error("Commit identifier '{commit}' is too short to derive a tag (need 7 characters)")]
    TagFormat { commit: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RunparcelError {
    /// Remediation hint shown under `--verbose`, kept out of the one-line
    /// message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            RunparcelError::FileNotFound { .. } => {
                Some("check the path, or use --values / --template to point at another file")
            }
            RunparcelError::SchemaError { .. } => Some(
                "expected a top-level 'environments' mapping, e.g. \
                 environments: {staging: {SERVICE_NAME: my-service}}",
            ),
            RunparcelError::Vcs { .. } => Some(
                "run inside a git repository with at least one commit, \
                 or pass an explicit tag: runparcel tag <TAG>",
            ),
            _ => None,
        }
    }
}

/// First non-blank line of a third-party error message, trimmed.
///
/// Handlebars and git report multi-line diagnostics; only the headline goes
/// into a `RunparcelError`.
pub fn first_line(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RunparcelError>;
