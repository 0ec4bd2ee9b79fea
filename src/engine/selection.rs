//! Selection sort stepper.
//!
//! Outer index `i` runs over `0..n`. With native granularity one `advance`
//! performs the whole inner scan over `i+1..n` for the extremal value and
//! swaps it into place, so a single step costs O(n) comparisons. With
//! [`Granularity::EveryComparison`] the scan is spread over one step per
//! comparison, followed by the placing step.

use serde::{Deserialize, Serialize};

use super::{
    ensure_active, Action, Algorithm, Granularity, Highlights, Order, SortStats, SortStepper,
    SortValue, Step, StepResult,
};
use crate::error::SortResult;

/// Resumable selection sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionStepper {
    order: Order,
    granularity: Granularity,
    len: usize,
    /// Slot being filled.
    i: usize,
    /// Extremal index found so far in the current scan.
    best: usize,
    /// Next index to compare against `best`.
    next: usize,
    scanning: bool,
    done: bool,
    stats: SortStats,
}

impl SelectionStepper {
    /// Create a stepper for a sequence of `len` values.
    #[must_use]
    pub fn new(len: usize, order: Order, granularity: Granularity) -> Self {
        Self {
            order,
            granularity,
            len,
            i: 0,
            best: 0,
            next: 1,
            scanning: false,
            done: false,
            stats: SortStats::default(),
        }
    }

    /// Slot currently being filled.
    #[must_use]
    pub const fn outer(&self) -> usize {
        self.i
    }
}

impl<T: SortValue> SortStepper<T> for SelectionStepper {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Selection
    }

    fn order(&self) -> Order {
        self.order
    }

    fn advance(&mut self, values: &mut [T]) -> SortResult<StepResult> {
        ensure_active(Algorithm::Selection, self.done, self.len, values.len())?;

        if self.i >= self.len {
            self.done = true;
            return Ok(StepResult::Done);
        }

        if !self.scanning {
            self.best = self.i;
            self.next = self.i + 1;
            self.scanning = true;
        }

        while self.next < self.len {
            let j = self.next;
            self.next += 1;
            self.stats.comparisons += 1;
            // Strict: ties keep the earlier index.
            if self.order.out_of_order(&values[self.best], &values[j]) {
                self.best = j;
            }
            if self.granularity == Granularity::EveryComparison {
                return Ok(self
                    .stats
                    .record(Step::new(Action::Compare, Highlights::pair(self.best, j))));
            }
        }

        let (i, best) = (self.i, self.best);
        values.swap(i, best);
        let action = if i == best { Action::Select } else { Action::Swap };
        self.i += 1;
        self.scanning = false;
        Ok(self.stats.record(Step::new(action, Highlights::pair(i, best))))
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn stats(&self) -> SortStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Role;
    use crate::error::SortError;

    fn drive(values: &mut [u32], order: Order, granularity: Granularity) -> Vec<Step> {
        let mut stepper = SelectionStepper::new(values.len(), order, granularity);
        let mut steps = Vec::new();
        while let StepResult::Progressed(step) =
            SortStepper::<u32>::advance(&mut stepper, values).expect("advance")
        {
            steps.push(step);
        }
        steps
    }

    #[test]
    fn test_all_equal_has_no_swaps() {
        let mut values = [2u32, 2, 2];
        let steps = drive(&mut values, Order::Ascending, Granularity::Native);
        assert_eq!(values, [2, 2, 2]);
        assert_eq!(steps.len(), 3);
        assert!(steps.iter().all(|s| s.action == Action::Select));
    }

    #[test]
    fn test_one_step_per_outer_index() {
        let mut values = [4u32, 1, 3, 2];
        let mut stepper = SelectionStepper::new(4, Order::Ascending, Granularity::Native);

        let step = stepper.advance(&mut values[..]).expect("advance");
        match step {
            StepResult::Progressed(step) => {
                assert_eq!(step.action, Action::Swap);
                assert_eq!(step.highlights.role_of(0), Some(Role::Primary));
                assert_eq!(step.highlights.role_of(1), Some(Role::Secondary));
            }
            StepResult::Done => panic!("finished early"),
        }
        assert_eq!(values, [1, 4, 3, 2]);
        assert_eq!(SortStepper::<u32>::stats(&stepper).comparisons, 3);

        for _ in 0..3 {
            let step = stepper.advance(&mut values[..]).expect("advance");
            assert!(matches!(step, StepResult::Progressed(_)));
        }
        assert_eq!(values, [1, 2, 3, 4]);
        assert_eq!(stepper.advance(&mut values[..]).expect("advance"), StepResult::Done);
    }

    #[test]
    fn test_descending() {
        let mut values = [3u32, 7, 1, 7, 5];
        drive(&mut values, Order::Descending, Granularity::Native);
        assert_eq!(values, [7, 7, 5, 3, 1]);
    }

    #[test]
    fn test_sorted_input_has_no_mutations() {
        let mut values = [9u32, 6, 3];
        let steps = drive(&mut values, Order::Descending, Granularity::Native);
        assert!(steps.iter().all(|s| !s.action.is_mutation()));
    }

    #[test]
    fn test_every_comparison_spreads_scan() {
        let mut values = [3u32, 1, 2];
        let steps = drive(&mut values, Order::Ascending, Granularity::EveryComparison);
        // i=0: 2 comparisons + place; i=1: 1 comparison + place; i=2: place.
        let actions: Vec<Action> = steps.iter().map(|s| s.action).collect();
        assert_eq!(
            actions,
            vec![
                Action::Compare,
                Action::Compare,
                Action::Swap,
                Action::Compare,
                Action::Swap,
                Action::Select,
            ]
        );
        assert_eq!(values, [1, 2, 3]);
    }

    #[test]
    fn test_single_element() {
        let mut values = [7u32];
        let steps = drive(&mut values, Order::Ascending, Granularity::Native);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].action, Action::Select);
    }

    #[test]
    fn test_advance_after_done_is_invalid_state() {
        let mut values = [1u32];
        let mut stepper = SelectionStepper::new(1, Order::Ascending, Granularity::Native);
        while let StepResult::Progressed(_) = stepper.advance(&mut values[..]).expect("advance") {}
        assert!(matches!(
            stepper.advance(&mut values[..]),
            Err(SortError::InvalidState { .. })
        ));
    }
}
