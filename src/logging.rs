//! Logging setup.
//!
//! Events go through `tracing`; binaries install a `tracing-subscriber`
//! formatter filtered by `RUST_LOG`, falling back to a level chosen by
//! verbosity. The terminal UI logs to a file since stderr shares the screen.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::SortResult;

/// Default filter for a `-v` count.
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)))
}

/// Log to stderr.
///
/// Does nothing if a subscriber is already installed.
pub fn init_stderr(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log to a file, truncating it.
///
/// # Errors
///
/// Returns error if the file cannot be created.
pub fn init_file(path: &Path, verbosity: u8) -> SortResult<()> {
    let file = File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbosity))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
