//! Scripted input for headless runs and tests.

use std::collections::VecDeque;
use std::time::Duration;

use super::{Command, InputSource};
use crate::error::SortResult;

/// Input source that replays one batch of commands per poll.
///
/// Once the script is exhausted every poll returns no commands, or `Quit`
/// when built with [`ScriptedInput::then_quit`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    batches: VecDeque<Vec<Command>>,
    polls: u64,
    quit_when_exhausted: bool,
}

impl ScriptedInput {
    /// Create a script from per-poll command batches.
    pub fn new<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<Command>>,
    {
        Self {
            batches: batches.into_iter().collect(),
            polls: 0,
            quit_when_exhausted: false,
        }
    }

    /// Answer every poll after the last batch with `Quit`.
    #[must_use]
    pub const fn then_quit(mut self) -> Self {
        self.quit_when_exhausted = true;
        self
    }

    /// Script that starts one sort and then only ticks.
    #[must_use]
    pub fn start_only() -> Self {
        Self::new([vec![Command::StartSort]])
    }

    /// Append a batch to the end of the script.
    pub fn push(&mut self, batch: Vec<Command>) {
        self.batches.push_back(batch);
    }

    /// Batches not yet delivered.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.batches.len()
    }

    /// Whether every batch has been delivered.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.batches.is_empty()
    }

    /// Number of polls served.
    #[must_use]
    pub const fn polls(&self) -> u64 {
        self.polls
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _timeout: Duration) -> SortResult<Vec<Command>> {
        self.polls += 1;
        match self.batches.pop_front() {
            Some(batch) => Ok(batch),
            None if self.quit_when_exhausted => Ok(vec![Command::Quit]),
            None => Ok(Vec::new()),
        }
    }
}
