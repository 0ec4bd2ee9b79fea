//! CLI command handlers.
//!
//! Handlers write to any `io::Write` and return `SortResult`; only
//! `run_cli` touches stdout and exit codes.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};

use super::args::{Args, Command, TraceArgs};
use super::output::{
    write_algorithms, write_config_report, write_summary, TraceRenderer, TraceSummary,
};
use crate::config::VisConfig;
use crate::driver::{Command as DriverCommand, Driver, Phase, Renderer};
use crate::error::SortResult;
use crate::logging;

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    logging::init_stderr(args.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match &args.command {
        Command::Trace(trace_args) => {
            trace(trace_args, &mut out).map(|summary| summary.sorted || summary.truncated)
        }
        Command::CheckConfig { path } => check_config(path, &mut out).map(|_| true),
        Command::Algorithms => write_algorithms(&mut out).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Configuration for a trace: the file (or defaults) with flags applied.
///
/// # Errors
///
/// Returns error if the file cannot be loaded or the result is invalid.
pub fn trace_config(args: &TraceArgs) -> SortResult<VisConfig> {
    let mut config = match &args.config {
        Some(path) => VisConfig::load(path)?,
        None => VisConfig::default(),
    };

    if let Some(algorithm) = args.algorithm {
        config.sort.algorithm = algorithm;
    }
    if let Some(order) = args.order {
        config.sort.order = order;
    }
    if let Some(granularity) = args.granularity {
        config.sort.granularity = granularity;
    }
    if let Some(length) = args.length {
        config.sequence.length = length;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    config.check()?;
    Ok(config)
}

/// Run one sort headless, writing each tick and a summary to `out`.
///
/// # Errors
///
/// Returns error for an invalid configuration or a failed write.
pub fn trace<W: Write>(args: &TraceArgs, out: &mut W) -> SortResult<TraceSummary> {
    let config = trace_config(args)?;
    let mut driver = Driver::new(&config)?;
    info!(
        seed = driver.seed(),
        algorithm = config.sort.algorithm.name(),
        "trace started"
    );

    let mut renderer = TraceRenderer::new(&mut *out, args.format);
    if !args.summary_only {
        renderer.render(&driver.frame())?;
    }

    driver.handle(DriverCommand::StartSort)?;
    let start = driver.ticks();
    let mut truncated = false;
    while driver.phase() == Phase::Sorting {
        if args
            .max_steps
            .is_some_and(|max| driver.ticks() - start >= max)
        {
            truncated = true;
            break;
        }
        driver.tick()?;
        if !args.summary_only {
            renderer.render(&driver.frame())?;
        }
    }

    let summary = TraceSummary {
        algorithm: config.sort.algorithm,
        order: config.sort.order,
        granularity: config.sort.granularity,
        seed: driver.seed(),
        length: driver.values().len(),
        ticks: driver.ticks() - start,
        stats: driver.stats(),
        sorted: config.sort.order.is_sorted(driver.values()),
        truncated,
    };
    write_summary(out, &summary, args.format)?;
    info!(ticks = summary.ticks, truncated, "trace finished");
    Ok(summary)
}

/// Load and validate a configuration file, then print it back.
///
/// # Errors
///
/// Returns error if the file cannot be read, parsed or validated.
pub fn check_config<W: Write>(path: &Path, out: &mut W) -> SortResult<VisConfig> {
    let config = VisConfig::load(path)?;
    info!(path = %path.display(), "configuration valid");
    write_config_report(out, &config)?;
    Ok(config)
}
