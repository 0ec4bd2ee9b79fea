//! Animation driver.
//!
//! The driver owns the sequence and the user's selection (algorithm and
//! order). It is either `Idle` or `Sorting`; while sorting it holds exactly
//! one stepper and resumes it once per tick.
//!
//! ```text
//!   Idle --StartSort--> Sorting --tick: Done--> Idle
//!    ^                     |
//!    +------- Reset -------+
//! ```
//!
//! Selection changes are only accepted while idle. A running stepper keeps
//! the order it was created with; changes apply to the next `StartSort`.

pub mod script;

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{SequenceConfig, VisConfig};
use crate::engine::clock::FrameClock;
use crate::engine::rng::SeqRng;
use crate::engine::{
    Action, Algorithm, Granularity, Highlights, Order, SortStats, SortStepper, Step, StepResult,
};
use crate::error::{SortError, SortResult};

pub use script::ScriptedInput;

/// Discrete user commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Command {
    /// Generate a new sequence, cancelling any running sort.
    Reset,
    /// Start sorting with the current selection.
    StartSort,
    /// Select ascending order for the next sort.
    SetAscending,
    /// Select descending order for the next sort.
    SetDescending,
    /// Select the algorithm for the next sort.
    SelectAlgorithm(Algorithm),
    /// Leave the run loop.
    Quit,
}

/// Driver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No stepper; selection can change.
    Idle,
    /// A stepper is active.
    Sorting,
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to run.
    Idle,
    /// The stepper reported a step.
    Progressed(Step),
    /// The stepper finished; the driver is idle again.
    Finished(SortStats),
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameRequest<'a> {
    /// Tick number.
    pub frame: u64,
    /// Driver state.
    pub phase: Phase,
    /// Current sequence.
    pub values: &'a [u32],
    /// Highlighted indices of this tick (empty when idle).
    pub highlights: &'a Highlights,
    /// Action of this tick's step, if any.
    pub action: Option<Action>,
    /// Selected (or running) algorithm.
    pub algorithm: Algorithm,
    /// Selected (or running) order.
    pub order: Order,
    /// Counters of the running or most recently finished sort.
    pub stats: SortStats,
}

/// Draws frames.
pub trait Renderer {
    /// Draw one frame.
    ///
    /// # Errors
    ///
    /// Returns error if the output cannot be written.
    fn render(&mut self, frame: &FrameRequest<'_>) -> SortResult<()>;
}

/// Produces user commands.
pub trait InputSource {
    /// Collect the commands available now, waiting at most `timeout`.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying input cannot be read.
    fn poll(&mut self, timeout: Duration) -> SortResult<Vec<Command>>;
}

/// The animation state machine.
#[derive(Debug)]
pub struct Driver {
    values: Vec<u32>,
    sequence: SequenceConfig,
    rng: SeqRng,
    algorithm: Algorithm,
    order: Order,
    granularity: Granularity,
    active: Option<Box<dyn SortStepper<u32>>>,
    highlights: Highlights,
    action: Option<Action>,
    stats: SortStats,
    ticks: u64,
    completed: u64,
    should_quit: bool,
}

impl Driver {
    /// Create an idle driver with a freshly generated sequence.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvalidConfiguration` if the sequence settings
    /// are unusable.
    pub fn new(config: &VisConfig) -> SortResult<Self> {
        let mut rng = config.rng();
        let values = rng.sequence(
            config.sequence.length,
            config.sequence.min,
            config.sequence.max,
        )?;
        info!(
            seed = rng.seed(),
            length = values.len(),
            "generated initial sequence"
        );
        Ok(Self::assemble(values, rng, config))
    }

    /// Create an idle driver sorting the given values first.
    ///
    /// Later resets still draw from the configured generator.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvalidConfiguration` if `values` is empty.
    pub fn with_values(values: Vec<u32>, config: &VisConfig) -> SortResult<Self> {
        if values.is_empty() {
            return Err(SortError::invalid_config("cannot drive an empty sequence"));
        }
        Ok(Self::assemble(values, config.rng(), config))
    }

    fn assemble(values: Vec<u32>, rng: SeqRng, config: &VisConfig) -> Self {
        Self {
            values,
            sequence: config.sequence,
            rng,
            algorithm: config.sort.algorithm,
            order: config.sort.order,
            granularity: config.sort.granularity,
            active: None,
            highlights: Highlights::new(),
            action: None,
            stats: SortStats::default(),
            ticks: 0,
            completed: 0,
            should_quit: false,
        }
    }

    /// Current state.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.active.is_some() {
            Phase::Sorting
        } else {
            Phase::Idle
        }
    }

    /// Current sequence.
    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Selected algorithm.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Selected order.
    #[must_use]
    pub const fn order(&self) -> Order {
        self.order
    }

    /// Algorithm and order of the running stepper, if any.
    #[must_use]
    pub fn running(&self) -> Option<(Algorithm, Order)> {
        self.active
            .as_ref()
            .map(|stepper| (stepper.algorithm(), stepper.order()))
    }

    /// Counters of the running or most recently finished sort.
    #[must_use]
    pub const fn stats(&self) -> SortStats {
        self.stats
    }

    /// Ticks taken so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Sorts that ran to completion.
    #[must_use]
    pub const fn completed(&self) -> u64 {
        self.completed
    }

    /// Seed of the sequence generator.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Check whether `Quit` was received.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply a user command.
    ///
    /// Returns `false` if the command was ignored because a sort is running.
    ///
    /// # Errors
    ///
    /// Returns error if a reset cannot generate a sequence or a sort cannot
    /// be started.
    pub fn handle(&mut self, command: Command) -> SortResult<bool> {
        let sorting = self.active.is_some();
        match command {
            Command::Quit => {
                self.should_quit = true;
                Ok(true)
            }
            Command::Reset => {
                self.reset()?;
                Ok(true)
            }
            _ if sorting => {
                debug!(?command, "ignored while sorting");
                Ok(false)
            }
            Command::StartSort => {
                self.start()?;
                Ok(true)
            }
            Command::SetAscending => {
                self.order = Order::Ascending;
                Ok(true)
            }
            Command::SetDescending => {
                self.order = Order::Descending;
                Ok(true)
            }
            Command::SelectAlgorithm(algorithm) => {
                self.algorithm = algorithm;
                Ok(true)
            }
        }
    }

    fn start(&mut self) -> SortResult<()> {
        let stepper =
            self.algorithm
                .stepper::<u32>(self.values.len(), self.order, self.granularity)?;
        info!(
            algorithm = self.algorithm.name(),
            order = self.order.label(),
            length = self.values.len(),
            "sort started"
        );
        self.stats = SortStats::default();
        self.active = Some(stepper);
        Ok(())
    }

    fn reset(&mut self) -> SortResult<()> {
        let values = self
            .rng
            .sequence(self.sequence.length, self.sequence.min, self.sequence.max)?;
        if let Some(stepper) = self.active.take() {
            info!(
                algorithm = stepper.algorithm().name(),
                steps = stepper.stats().steps,
                "sort cancelled by reset"
            );
        }
        self.values = values;
        self.highlights = Highlights::new();
        self.action = None;
        self.stats = SortStats::default();
        debug!(generation = self.rng.generation(), "sequence regenerated");
        Ok(())
    }

    /// Run one tick: resume the stepper once if sorting.
    ///
    /// # Errors
    ///
    /// Propagates stepper errors.
    pub fn tick(&mut self) -> SortResult<TickOutcome> {
        self.ticks += 1;
        self.highlights = Highlights::new();
        self.action = None;

        let Some(stepper) = self.active.as_mut() else {
            return Ok(TickOutcome::Idle);
        };

        let result = stepper.advance(&mut self.values);
        self.stats = stepper.stats();
        match result? {
            StepResult::Progressed(step) => {
                self.highlights = step.highlights.clone();
                self.action = Some(step.action);
                Ok(TickOutcome::Progressed(step))
            }
            StepResult::Done => {
                self.active = None;
                self.completed += 1;
                info!(
                    algorithm = self.algorithm.name(),
                    steps = self.stats.steps,
                    comparisons = self.stats.comparisons,
                    "sort finished"
                );
                Ok(TickOutcome::Finished(self.stats))
            }
        }
    }

    /// Frame describing the current state.
    #[must_use]
    pub fn frame(&self) -> FrameRequest<'_> {
        FrameRequest {
            frame: self.ticks,
            phase: self.phase(),
            values: &self.values,
            highlights: &self.highlights,
            action: self.action,
            algorithm: self.algorithm,
            order: self.order,
            stats: self.stats,
        }
    }
}

/// How the run loop spaces ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Wait for the frame clock between ticks.
    RealTime,
    /// Tick as fast as possible, one tick per input poll.
    Unpaced,
}

/// Totals of a finished run loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Ticks executed.
    pub ticks: u64,
    /// Sorts that completed.
    pub completed: u64,
}

/// Drive `driver` until `Quit` or until `max_ticks` ticks have run.
///
/// Each iteration polls input and applies the commands, then, when a tick is
/// due, resumes the driver once and renders the resulting frame.
///
/// With `max_ticks` unset the loop only ends on `Quit`. An input source that
/// never yields it (an exhausted [`ScriptedInput`] without
/// [`ScriptedInput::then_quit`]) keeps the loop running forever.
///
/// # Errors
///
/// Propagates driver, renderer and input errors.
pub fn run<R, I>(
    driver: &mut Driver,
    renderer: &mut R,
    input: &mut I,
    clock: &mut FrameClock,
    pacing: Pacing,
    max_ticks: Option<u64>,
) -> SortResult<RunSummary>
where
    R: Renderer + ?Sized,
    I: InputSource + ?Sized,
{
    let start_ticks = driver.ticks();
    let start_completed = driver.completed();
    let mut last_tick = Instant::now();

    renderer.render(&driver.frame())?;

    loop {
        let timeout = match pacing {
            Pacing::RealTime => clock.remaining(last_tick.elapsed()),
            Pacing::Unpaced => Duration::ZERO,
        };
        for command in input.poll(timeout)? {
            driver.handle(command)?;
        }
        if driver.should_quit() {
            break;
        }

        let due = pacing == Pacing::Unpaced || clock.is_due(last_tick.elapsed());
        if due {
            driver.tick()?;
            renderer.render(&driver.frame())?;
            clock.tick();
            last_tick = Instant::now();

            if max_ticks.is_some_and(|max| driver.ticks() - start_ticks >= max) {
                break;
            }
        }
    }

    Ok(RunSummary {
        ticks: driver.ticks() - start_ticks,
        completed: driver.completed() - start_completed,
    })
}
