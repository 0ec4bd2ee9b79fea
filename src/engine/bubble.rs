//! Bubble sort stepper.
//!
//! Outer pass `i` runs over `0..n-1`, inner index `j` over `0..n-i-1`. With
//! native granularity only swaps are reported: one `advance` keeps comparing
//! adjacent pairs until it finds one out of order, swaps it and suspends.

use serde::{Deserialize, Serialize};

use super::{
    ensure_active, Action, Algorithm, Granularity, Highlights, Order, SortStats, SortStepper,
    SortValue, Step, StepResult,
};
use crate::error::SortResult;

/// Resumable bubble sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BubbleStepper {
    order: Order,
    granularity: Granularity,
    len: usize,
    /// Completed passes.
    i: usize,
    /// Next left index to compare.
    j: usize,
    done: bool,
    stats: SortStats,
}

impl BubbleStepper {
    /// Create a stepper for a sequence of `len` values.
    #[must_use]
    pub fn new(len: usize, order: Order, granularity: Granularity) -> Self {
        Self {
            order,
            granularity,
            len,
            i: 0,
            j: 0,
            done: false,
            stats: SortStats::default(),
        }
    }

    /// Current `(pass, inner index)` position.
    #[must_use]
    pub const fn position(&self) -> (usize, usize) {
        (self.i, self.j)
    }

    fn pass_len(&self) -> usize {
        self.len - self.i - 1
    }
}

impl<T: SortValue> SortStepper<T> for BubbleStepper {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bubble
    }

    fn order(&self) -> Order {
        self.order
    }

    fn advance(&mut self, values: &mut [T]) -> SortResult<StepResult> {
        ensure_active(Algorithm::Bubble, self.done, self.len, values.len())?;

        while self.i + 1 < self.len {
            if self.j >= self.pass_len() {
                self.i += 1;
                self.j = 0;
                continue;
            }

            let j = self.j;
            self.j += 1;
            self.stats.comparisons += 1;

            if self.order.out_of_order(&values[j], &values[j + 1]) {
                values.swap(j, j + 1);
                return Ok(self
                    .stats
                    .record(Step::new(Action::Swap, Highlights::pair(j, j + 1))));
            }
            if self.granularity == Granularity::EveryComparison {
                return Ok(self
                    .stats
                    .record(Step::new(Action::Compare, Highlights::pair(j, j + 1))));
            }
        }

        self.done = true;
        Ok(StepResult::Done)
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
    use crate::engine::{inversions, Role};
    use crate::error::SortError;

    fn drive(values: &mut [u32], order: Order, granularity: Granularity) -> Vec<Step> {
        let mut stepper = BubbleStepper::new(values.len(), order, granularity);
        let mut steps = Vec::new();
        while let StepResult::Progressed(step) =
            SortStepper::<u32>::advance(&mut stepper, values).expect("advance")
        {
            steps.push(step);
        }
        steps
    }

    #[test]
    fn test_five_value_trace() {
        let mut values = [5u32, 3, 4, 1, 2];
        let mut stepper = BubbleStepper::new(values.len(), Order::Ascending, Granularity::Native);

        // First pass: (5,3) (5,4) (5,1) (5,2) all swap.
        let expected_first_pass = [
            [3, 5, 4, 1, 2],
            [3, 4, 5, 1, 2],
            [3, 4, 1, 5, 2],
            [3, 4, 1, 2, 5],
        ];
        for (k, expected) in expected_first_pass.iter().enumerate() {
            let result = stepper.advance(&mut values[..]).expect("advance");
            match result {
                StepResult::Progressed(step) => {
                    assert_eq!(step.action, Action::Swap);
                    assert_eq!(step.highlights.role_of(k), Some(Role::Primary));
                    assert_eq!(step.highlights.role_of(k + 1), Some(Role::Secondary));
                }
                StepResult::Done => panic!("finished early"),
            }
            assert_eq!(&values, expected);
        }

        // Second pass skips (3,4) and swaps (4,1).
        let result = stepper.advance(&mut values[..]).expect("advance");
        assert!(matches!(result, StepResult::Progressed(_)));
        assert_eq!(values, [3, 1, 4, 2, 5]);
    }

    #[test]
    fn test_swap_count_equals_inversions() {
        let mut values = [5u32, 3, 4, 1, 2];
        let before = inversions(&values, Order::Ascending);
        let steps = drive(&mut values, Order::Ascending, Granularity::Native);
        assert_eq!(values, [1, 2, 3, 4, 5]);
        assert_eq!(steps.len(), before);
        assert!(steps.iter().all(|s| s.action == Action::Swap));
    }

    #[test]
    fn test_inversions_drop_by_one_per_swap() {
        let mut values = [5u32, 3, 4, 1, 2];
        let mut stepper = BubbleStepper::new(values.len(), Order::Ascending, Granularity::Native);
        let mut last = inversions(&values, Order::Ascending);
        while let StepResult::Progressed(_) = stepper.advance(&mut values[..]).expect("advance") {
            let now = inversions(&values, Order::Ascending);
            assert_eq!(now + 1, last);
            last = now;
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn test_descending() {
        let mut values = [1u32, 4, 2, 4, 3];
        drive(&mut values, Order::Descending, Granularity::Native);
        assert_eq!(values, [4, 4, 3, 2, 1]);
    }

    #[test]
    fn test_sorted_input_has_no_steps() {
        let mut values = [1u32, 2, 3, 4];
        let steps = drive(&mut values, Order::Ascending, Granularity::Native);
        assert!(steps.is_empty());
    }

    #[test]
    fn test_every_comparison_reports_each_pair() {
        let mut values = [1u32, 2, 3, 4];
        let steps = drive(&mut values, Order::Ascending, Granularity::EveryComparison);
        // n(n-1)/2 comparisons without early exit.
        assert_eq!(steps.len(), 6);
        assert!(steps.iter().all(|s| s.action == Action::Compare));
    }

    #[test]
    fn test_single_element_done_immediately() {
        let mut values = [7u32];
        let mut stepper = BubbleStepper::new(1, Order::Ascending, Granularity::Native);
        assert_eq!(stepper.advance(&mut values[..]).expect("advance"), StepResult::Done);
        assert!(SortStepper::<u32>::is_done(&stepper));
    }

    #[test]
    fn test_advance_after_done_is_invalid_state() {
        let mut values = [2u32, 1];
        let mut stepper = BubbleStepper::new(2, Order::Ascending, Granularity::Native);
        while let StepResult::Progressed(_) = stepper.advance(&mut values[..]).expect("advance") {}
        let err = stepper.advance(&mut values[..]);
        assert!(matches!(err, Err(SortError::InvalidState { .. })));
    }

    #[test]
    fn test_length_change_is_invalid_state() {
        let mut values = [3u32, 2, 1];
        let mut stepper = BubbleStepper::new(4, Order::Ascending, Granularity::Native);
        assert!(stepper.advance(&mut values[..]).is_err());
    }

    #[test]
    fn test_stats() {
        let mut values = [3u32, 2, 1];
        let mut stepper = BubbleStepper::new(3, Order::Ascending, Granularity::Native);
        while let StepResult::Progressed(_) = stepper.advance(&mut values[..]).expect("advance") {}
        let stats = SortStepper::<u32>::stats(&stepper);
        assert_eq!(stats.swaps, 3);
        assert_eq!(stats.comparisons, 3);
        assert_eq!(stats.steps, 3);
    }
}
