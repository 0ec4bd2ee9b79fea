//! sortvis CLI
//!
//! Headless tracing and configuration checks. The interactive view is the
//! `sort-tui` binary.

use std::process::ExitCode;

use clap::Parser;
use sortvis::cli::{run_cli, Args};

fn main() -> ExitCode {
    run_cli(Args::parse())
}
