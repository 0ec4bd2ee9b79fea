//! Insertion sort stepper.
//!
//! Outer index `i` runs over `1..n`. At the start of each outer iteration the
//! value at `i` is held as the key and a hole opens at `i`. Each `advance`
//! either shifts the value left of the hole one slot right (the hole moves
//! left) or writes the key into the hole and moves on to the next `i`.

use serde::{Deserialize, Serialize};

use super::{
    ensure_active, Action, Algorithm, Highlights, Order, SortStats, SortStepper, SortValue, Step,
    StepResult,
};
use crate::error::SortResult;

/// Resumable insertion sort.
///
/// Every step already involves at most one comparison, so there is no
/// granularity setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionStepper<T> {
    order: Order,
    len: usize,
    /// Outer index whose value is being inserted.
    i: usize,
    /// Held value, `None` between outer iterations.
    key: Option<T>,
    /// Slot the key will be written to (`j + 1` in the textbook loop).
    hole: usize,
    done: bool,
    stats: SortStats,
}

impl<T: SortValue> InsertionStepper<T> {
    /// Create a stepper for a sequence of `len` values.
    #[must_use]
    pub fn new(len: usize, order: Order) -> Self {
        Self {
            order,
            len,
            i: 1,
            key: None,
            hole: 1,
            done: false,
            stats: SortStats::default(),
        }
    }

    /// Current outer index.
    #[must_use]
    pub const fn outer(&self) -> usize {
        self.i
    }

    /// Value currently held out of the sequence.
    #[must_use]
    pub const fn key(&self) -> Option<T> {
        self.key
    }
}

impl<T: SortValue> SortStepper<T> for InsertionStepper<T> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Insertion
    }

    fn order(&self) -> Order {
        self.order
    }

    fn advance(&mut self, values: &mut [T]) -> SortResult<StepResult> {
        ensure_active(Algorithm::Insertion, self.done, self.len, values.len())?;

        if self.i >= self.len {
            self.done = true;
            return Ok(StepResult::Done);
        }

        let key = if let Some(key) = self.key {
            key
        } else {
            self.hole = self.i;
            self.key = Some(values[self.i]);
            values[self.i]
        };

        if self.hole > 0 {
            self.stats.comparisons += 1;
            if self.order.out_of_order(&values[self.hole - 1], &key) {
                values[self.hole] = values[self.hole - 1];
                self.hole -= 1;
                return Ok(self
                    .stats
                    .record(Step::new(Action::Shift, Highlights::pair(self.hole, self.i))));
            }
        }

        values[self.hole] = key;
        let step = Step::new(Action::Insert, Highlights::pair(self.hole, self.i));
        self.i += 1;
        self.key = None;
        Ok(self.stats.record(step))
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

    fn drive(values: &mut [u32], order: Order) -> Vec<Step> {
        let mut stepper = InsertionStepper::<u32>::new(values.len(), order);
        let mut steps = Vec::new();
        while let StepResult::Progressed(step) = stepper.advance(values).expect("advance") {
            steps.push(step);
        }
        steps
    }

    #[test]
    fn test_single_element_done_on_first_advance() {
        let mut values = [7u32];
        let mut stepper = InsertionStepper::<u32>::new(1, Order::Ascending);
        assert_eq!(stepper.advance(&mut values).expect("advance"), StepResult::Done);
        assert_eq!(stepper.stats().steps, 0);
        assert_eq!(values, [7]);
    }

    #[test]
    fn test_shift_then_insert_trace() {
        let mut values = [2u32, 3, 1];
        let mut stepper = InsertionStepper::<u32>::new(3, Order::Ascending);

        // i = 1: 2 <= 3, key written back in place.
        let step = stepper.advance(&mut values).expect("advance");
        assert_eq!(
            step,
            StepResult::Progressed(Step::new(Action::Insert, Highlights::pair(1, 1)))
        );
        assert_eq!(values, [2, 3, 1]);

        // i = 2: key 1 shifts 3 then 2 right, then lands at 0.
        let step = stepper.advance(&mut values).expect("advance");
        assert_eq!(
            step,
            StepResult::Progressed(Step::new(Action::Shift, Highlights::pair(1, 2)))
        );
        assert_eq!(values, [2, 3, 3]);
        assert_eq!(stepper.key(), Some(1));

        let step = stepper.advance(&mut values).expect("advance");
        assert_eq!(
            step,
            StepResult::Progressed(Step::new(Action::Shift, Highlights::pair(0, 2)))
        );
        assert_eq!(values, [2, 2, 3]);

        let step = stepper.advance(&mut values).expect("advance");
        match step {
            StepResult::Progressed(step) => {
                assert_eq!(step.action, Action::Insert);
                assert_eq!(step.highlights.role_of(0), Some(Role::Primary));
                assert_eq!(step.highlights.role_of(2), Some(Role::Secondary));
            }
            StepResult::Done => panic!("finished early"),
        }
        assert_eq!(values, [1, 2, 3]);

        assert_eq!(stepper.advance(&mut values).expect("advance"), StepResult::Done);
    }

    #[test]
    fn test_descending() {
        let mut values = [3u32, 9, 1, 9, 4];
        drive(&mut values, Order::Descending);
        assert_eq!(values, [9, 9, 4, 3, 1]);
    }

    #[test]
    fn test_sorted_input_only_inserts() {
        let mut values = [1u32, 2, 3, 4, 5];
        let steps = drive(&mut values, Order::Ascending);
        assert_eq!(steps.len(), 4);
        assert!(steps.iter().all(|s| s.action == Action::Insert));
    }

    #[test]
    fn test_shift_count_equals_inversions() {
        let mut values = [5u32, 3, 4, 1, 2];
        let steps = drive(&mut values, Order::Ascending);
        let shifts = steps.iter().filter(|s| s.action == Action::Shift).count();
        assert_eq!(shifts, 8);
        assert_eq!(values, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_advance_after_done_is_invalid_state() {
        let mut values = [1u32, 2];
        let mut stepper = InsertionStepper::<u32>::new(2, Order::Ascending);
        while let StepResult::Progressed(_) = stepper.advance(&mut values).expect("advance") {}
        assert!(matches!(
            stepper.advance(&mut values),
            Err(SortError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_stats_count_writes_and_shifts() {
        let mut values = [3u32, 2, 1];
        let mut stepper = InsertionStepper::<u32>::new(3, Order::Ascending);
        while let StepResult::Progressed(_) = stepper.advance(&mut values).expect("advance") {}
        let stats = stepper.stats();
        assert_eq!(stats.shifts, 3);
        assert_eq!(stats.writes, 2);
        assert_eq!(stats.steps, 5);
    }
}
