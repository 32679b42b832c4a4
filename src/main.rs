mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

/// Diagnostics go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("runparcel={default_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let args = Cli::parse();

    init_tracing(args.verbose);
    cli::output::set_quiet(args.quiet);
    cli::context::init(args.config.as_deref());

    let result = match &args.command {
        Commands::Generate {
            template,
            values,
            output,
            tag,
        } => cli::commands::generate::execute(
            template.as_deref(),
            values.as_deref(),
            output.as_deref(),
            tag.as_deref(),
        ),
        Commands::Check { template, values } => {
            cli::commands::check::execute(template.as_deref(), values.as_deref())
        }
        Commands::Tag { tag } => cli::commands::tag::execute(tag.as_deref()),
    };

    if let Err(e) = result {
        if let Some(hint) = e.hint() {
            tracing::debug!("hint: {hint}");
        }
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
