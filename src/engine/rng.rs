//! Deterministic random sequence generation.
//!
//! Uses PCG (Permuted Congruential Generator) so that a recorded seed
//! reproduces the exact same bar chart on every platform.

use rand::prelude::*;
use rand_pcg::Pcg64;

use crate::error::{SortError, SortResult};

/// Seeded generator for the values to be sorted.
#[derive(Debug, Clone)]
pub struct SeqRng {
    /// Seed the generator was created from.
    seed: u64,
    /// Number of sequences generated so far.
    generation: u64,
    rng: Pcg64,
}

impl SeqRng {
    /// Create a generator with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            generation: 0,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Create a generator from OS entropy.
    ///
    /// The drawn seed is kept so the run can be reproduced with `--seed`.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this generator was created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of sequences generated so far.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Draw a value uniformly from `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvalidConfiguration` if `min > max`.
    pub fn gen_in_range(&mut self, min: u32, max: u32) -> SortResult<u32> {
        check_range(min, max)?;
        Ok(self.rng.gen_range(min..=max))
    }

    /// Generate `length` values drawn uniformly from `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvalidConfiguration` if `length` is zero or
    /// `min > max`.
    pub fn sequence(&mut self, length: usize, min: u32, max: u32) -> SortResult<Vec<u32>> {
        if length == 0 {
            return Err(SortError::invalid_config(
                "sequence length must be at least 1",
            ));
        }
        check_range(min, max)?;

        let values = (0..length)
            .map(|_| self.rng.gen_range(min..=max))
            .collect();
        self.generation += 1;
        Ok(values)
    }
}

fn check_range(min: u32, max: u32) -> SortResult<()> {
    if min > max {
        return Err(SortError::invalid_config(format!(
            "value range is empty: min {min} exceeds max {max}"
        )));
    }
    Ok(())
}
