//! CLI module for sortvis.
//!
//! This module contains all CLI logic extracted from main.rs to enable
//! full test coverage. The entry point `run_cli` can be called from main.rs
//! with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, TraceArgs, TraceFormat};
pub use commands::{check_config, run_cli, trace, trace_config};
pub use output::{
    format_frame, write_algorithms, write_config_report, write_summary, TraceRenderer,
    TraceSummary,
};
