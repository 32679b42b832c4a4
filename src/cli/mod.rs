pub mod commands;
pub mod context;
pub mod output;

use clap::{Parser, Subcommand};

/// Render per-environment Cloud Run manifests from one template and a layered values file.
#[derive(Parser, Debug)]
#[command(name = "runparcel", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug diagnostics on stderr)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the project config file (default: runparcel.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate deployment YAML files, one per environment
    Generate {
        /// Path to the template file (default: cloudrun/run.yaml.tmpl)
        #[arg(short, long)]
        template: Option<String>,

        /// Path to the values file (default: values.yaml)
        #[arg(short, long)]
        values: Option<String>,

        /// Directory for the generated files (default: deploy)
        #[arg(short, long)]
        output: Option<String>,

        /// Inject IMAGE_TAG into the common values. Without a value the tag
        /// is generated from the date and the current git commit.
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        tag: Option<String>,
    },

    /// Validate and render every environment without writing files
    Check {
        /// Path to the template file (default: cloudrun/run.yaml.tmpl)
        #[arg(short, long)]
        template: Option<String>,

        /// Path to the values file (default: values.yaml)
        #[arg(short, long)]
        values: Option<String>,
    },

    /// Print the release tag (given, or YYYY.MM.DD.<short commit>)
    Tag {
        /// Tag to use as-is
        tag: Option<String>,
    },
}
