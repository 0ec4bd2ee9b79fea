//! CLI output formatting.
//!
//! Writers take any `io::Write` so output can be checked in tests.

use std::fmt::Write as _;
use std::io::Write;

use serde::Serialize;

use super::args::TraceFormat;
use crate::config::VisConfig;
use crate::driver::{FrameRequest, Renderer};
use crate::engine::{Algorithm, Granularity, Order, Role, SortStats};
use crate::error::SortResult;

/// Renderer writing one line per frame.
#[derive(Debug)]
pub struct TraceRenderer<W: Write> {
    out: W,
    format: TraceFormat,
    frames: u64,
}

impl<W: Write> TraceRenderer<W> {
    /// Create a renderer writing to `out`.
    pub const fn new(out: W, format: TraceFormat) -> Self {
        Self {
            out,
            format,
            frames: 0,
        }
    }

    /// Frames written so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TraceRenderer<W> {
    fn render(&mut self, frame: &FrameRequest<'_>) -> SortResult<()> {
        match self.format {
            TraceFormat::Text => writeln!(self.out, "{}", format_frame(frame))?,
            TraceFormat::Json => {
                serde_json::to_writer(&mut self.out, frame)?;
                writeln!(self.out)?;
            }
        }
        self.frames += 1;
        Ok(())
    }
}

/// One text line: frame, phase, action, highlights, then the values with
/// the primary index in `[]` and the secondary in `()`.
#[must_use]
pub fn format_frame(frame: &FrameRequest<'_>) -> String {
    let action = frame
        .action
        .map_or_else(|| "-".to_string(), |action| format!("{action:?}").to_lowercase());
    let phase = format!("{:?}", frame.phase).to_lowercase();
    let mut line = format!("{:>6} {phase:<7} {action:<7} |", frame.frame);
    for (index, value) in frame.values.iter().enumerate() {
        let _ = match frame.highlights.role_of(index) {
            Some(Role::Primary) => write!(line, " [{value}]"),
            Some(Role::Secondary) => write!(line, " ({value})"),
            None => write!(line, " {value}"),
        };
    }
    line
}

/// Result of a trace run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceSummary {
    /// Algorithm that ran.
    pub algorithm: Algorithm,
    /// Order that was requested.
    pub order: Order,
    /// Step granularity.
    pub granularity: Granularity,
    /// Seed of the generated sequence.
    pub seed: u64,
    /// Number of values.
    pub length: usize,
    /// Ticks executed after the start command.
    pub ticks: u64,
    /// Counters of the sort.
    pub stats: SortStats,
    /// Whether the final sequence is ordered.
    pub sorted: bool,
    /// Whether `--max-steps` stopped the sort early.
    pub truncated: bool,
}

/// Print the trace summary.
///
/// # Errors
///
/// Returns error if writing or JSON encoding fails.
pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &TraceSummary,
    format: TraceFormat,
) -> SortResult<()> {
    match format {
        TraceFormat::Json => {
            serde_json::to_writer(&mut *out, summary)?;
            writeln!(out)?;
        }
        TraceFormat::Text => {
            writeln!(
                out,
                "{} ({}, {:?}) seed {} n {}",
                summary.algorithm,
                summary.order,
                summary.granularity,
                summary.seed,
                summary.length
            )?;
            writeln!(
                out,
                "  ticks {}  steps {}  comparisons {}  swaps {}  shifts {}  writes {}",
                summary.ticks,
                summary.stats.steps,
                summary.stats.comparisons,
                summary.stats.swaps,
                summary.stats.shifts,
                summary.stats.writes
            )?;
            let status = if summary.truncated {
                "stopped early"
            } else if summary.sorted {
                "sorted"
            } else {
                "NOT SORTED"
            };
            writeln!(out, "  {status}")?;
        }
    }
    Ok(())
}

/// Print the algorithm table.
///
/// # Errors
///
/// Returns error if writing fails.
pub fn write_algorithms<W: Write>(out: &mut W) -> SortResult<()> {
    writeln!(out, "KEY  NAME             CLI NAME")?;
    for algorithm in Algorithm::ALL {
        let cli_name = format!("{algorithm:?}").to_lowercase();
        writeln!(out, "{:<4} {:<16} {cli_name}", algorithm.key(), algorithm.name())?;
    }
    Ok(())
}

/// Print a validated configuration.
///
/// # Errors
///
/// Returns error if writing or YAML encoding fails.
pub fn write_config_report<W: Write>(out: &mut W, config: &VisConfig) -> SortResult<()> {
    writeln!(out, "configuration OK")?;
    write!(out, "{}", config.to_yaml()?)?;
    Ok(())
}
