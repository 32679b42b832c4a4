use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

static QUIET: AtomicBool = AtomicBool::new(false);

/// Suppress everything except errors (`--quiet`).
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print a success message.
pub fn success(msg: &str) {
    if !quiet() {
        println!("  {} {}", "✓".green(), msg);
    }
}

/// Print a warning message.
pub fn warning(msg: &str) {
    if !quiet() {
        println!("  {} {}", "⚠".yellow(), msg);
    }
}

/// Print an informational notice on stderr, keeping stdout clean for
/// values meant to be captured by scripts.
pub fn info(msg: &str) {
    if !quiet() {
        eprintln!("  {} {}", "ℹ".blue(), msg);
    }
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a header line.
pub fn header(msg: &str) {
    if !quiet() {
        println!("\n{}", msg.bold());
    }
}
