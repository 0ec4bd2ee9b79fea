//! CLI argument parsing.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::engine::{Algorithm, Granularity, Order};

/// Step-by-step sorting visualizer.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "sortvis",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SORTVIS_GIT_HASH"), ")"),
    about,
    long_about = None
)]
pub struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run one sort headless and print every tick
    Trace(TraceArgs),
    /// Load and validate a configuration file
    CheckConfig {
        /// Path to the YAML configuration.
        path: PathBuf,
    },
    /// List the available algorithms and their keys
    Algorithms,
}

/// Options of `sortvis trace`.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub struct TraceArgs {
    /// YAML configuration to start from.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Algorithm: bubble, insertion or selection.
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,

    /// Order: ascending or descending.
    #[arg(short, long)]
    pub order: Option<Order>,

    /// Number of values to sort.
    #[arg(short = 'n', long)]
    pub length: Option<usize>,

    /// Seed for the generated sequence.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Step granularity: native or every-comparison.
    #[arg(short, long)]
    pub granularity: Option<Granularity>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = TraceFormat::Text)]
    pub format: TraceFormat,

    /// Stop after this many ticks.
    #[arg(long)]
    pub max_steps: Option<u64>,

    /// Print only the summary.
    #[arg(long)]
    pub summary_only: bool,
}

/// Trace output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TraceFormat {
    /// One human-readable line per tick.
    #[default]
    Text,
    /// One JSON object per tick.
    Json,
}
