//! Resumable sorting engine.
//!
//! Each sorting algorithm is an explicit state machine holding its loop
//! counters as fields. A single call to [`SortStepper::advance`] performs one
//! semantic unit of work on a borrowed slice, then returns control to the
//! caller together with a [`Step`] describing which indices were touched.
//!
//! # Step granularity
//!
//! With [`Granularity::Native`] the unit of work differs per algorithm:
//!
//! - bubble sort yields only on swaps (non-swapping comparisons are skipped),
//! - insertion sort yields on every shift and on the final key write,
//! - selection sort yields once per outer iteration (full inner scan + swap).
//!
//! [`Granularity::EveryComparison`] makes every comparison visible instead.
//!
//! # Example
//!
//! ```rust
//! use sortvis::engine::{Advance, Algorithm, Order, StepSource};
//!
//! let mut values = vec![5u32, 3, 4, 1, 2];
//! let mut source = StepSource::new(&mut values, Algorithm::Bubble, Order::Ascending)?;
//! loop {
//!     match source.advance()? {
//!         Advance::Progressed(step) => assert!(!step.highlights.is_empty()),
//!         Advance::Done(sorted) => {
//!             assert_eq!(sorted, &[1, 2, 3, 4, 5]);
//!             break;
//!         }
//!     }
//! }
//! # Ok::<(), sortvis::SortError>(())
//! ```

pub mod bubble;
pub mod clock;
pub mod insertion;
pub mod rng;
pub mod selection;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SortError, SortResult};

pub use bubble::BubbleStepper;
pub use insertion::InsertionStepper;
pub use selection::SelectionStepper;

/// Values that can be sorted by a stepper.
pub trait SortValue: Ord + Copy + fmt::Debug + 'static {}

impl<T: Ord + Copy + fmt::Debug + 'static> SortValue for T {}

/// Sort direction, fixed for the lifetime of a stepper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Non-decreasing.
    #[default]
    Ascending,
    /// Non-increasing.
    Descending,
}

impl Order {
    /// Check whether this is ascending order.
    #[must_use]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Ascending)
    }

    /// Check whether `left` must not precede `right` under this order.
    ///
    /// Equal values are never out of order.
    #[must_use]
    pub fn out_of_order<T: Ord>(self, left: &T, right: &T) -> bool {
        match self {
            Self::Ascending => left > right,
            Self::Descending => left < right,
        }
    }

    /// Check whether a slice is monotonic under this order.
    #[must_use]
    pub fn is_sorted<T: Ord>(self, values: &[T]) -> bool {
        values
            .windows(2)
            .all(|pair| !self.out_of_order(&pair[0], &pair[1]))
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ascending => "Ascending",
            Self::Descending => "Descending",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Order {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(SortError::invalid_config(format!(
                "unknown order '{other}' (expected ascending or descending)"
            ))),
        }
    }
}

/// Count pairs `(a, b)` with `a < b` whose values are out of order.
#[must_use]
pub fn inversions<T: Ord>(values: &[T], order: Order) -> usize {
    values
        .iter()
        .enumerate()
        .map(|(a, left)| {
            values[a + 1..]
                .iter()
                .filter(|right| order.out_of_order(left, *right))
                .count()
        })
        .sum()
}

/// How much work a single step performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Each algorithm's own unit (see module docs).
    #[default]
    Native,
    /// One comparison per step in every algorithm.
    EveryComparison,
}

impl FromStr for Granularity {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "native" => Ok(Self::Native),
            "every_comparison" | "comparison" => Ok(Self::EveryComparison),
            other => Err(SortError::invalid_config(format!(
                "unknown granularity '{other}' (expected native or every-comparison)"
            ))),
        }
    }
}

/// Display role of a highlighted index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The index the step is anchored on (green in the classic palette).
    Primary,
    /// The index paired with it (red in the classic palette).
    Secondary,
}

/// A single highlighted index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    /// Position in the sequence.
    pub index: usize,
    /// How the renderer should mark it.
    pub role: Role,
}

/// Indices touched by one step and their roles.
///
/// Built fresh for every step. An index appears at most once; assigning a
/// second role to it replaces the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Highlights {
    entries: Vec<Highlight>,
}

impl Highlights {
    /// Create an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Report `primary` and `secondary`; if they coincide the index is `Secondary`.
    #[must_use]
    pub fn pair(primary: usize, secondary: usize) -> Self {
        Self::new()
            .with(primary, Role::Primary)
            .with(secondary, Role::Secondary)
    }

    /// Assign `role` to `index`, replacing any previous role.
    #[must_use]
    pub fn with(mut self, index: usize, role: Role) -> Self {
        if let Some(entry) = self.entries.iter_mut().find(|h| h.index == index) {
            entry.role = role;
        } else {
            self.entries.push(Highlight { index, role });
        }
        self
    }

    /// Role assigned to `index`, if highlighted.
    #[must_use]
    pub fn role_of(&self, index: usize) -> Option<Role> {
        self.entries
            .iter()
            .find(|h| h.index == index)
            .map(|h| h.role)
    }

    /// Iterate over highlighted entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Highlight> {
        self.entries.iter()
    }

    /// Number of highlighted indices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is highlighted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What a step did to the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Compared two values without moving anything.
    Compare,
    /// Exchanged two values.
    Swap,
    /// Moved a value one slot over during an insertion pass.
    Shift,
    /// Wrote the held key back into the sequence.
    Insert,
    /// Selected the extremal value already in place.
    Select,
}

impl Action {
    /// Check if this action changed the order of values.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        matches!(self, Self::Swap | Self::Shift)
    }
}

/// One unit of progress reported by a stepper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// What happened.
    pub action: Action,
    /// Which indices to highlight.
    pub highlights: Highlights,
}

impl Step {
    /// Create a step.
    #[must_use]
    pub const fn new(action: Action, highlights: Highlights) -> Self {
        Self { action, highlights }
    }
}

/// Outcome of [`SortStepper::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// One unit of work was done; the sort is not finished yet.
    Progressed(Step),
    /// The sequence is sorted. Further advances are errors.
    Done,
}

/// Work counters of a stepper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortStats {
    /// Value comparisons performed.
    pub comparisons: u64,
    /// Two-element exchanges that changed the sequence.
    pub swaps: u64,
    /// Insertion shifts.
    pub shifts: u64,
    /// Key write-backs.
    pub writes: u64,
    /// Progressed steps reported.
    pub steps: u64,
}

impl SortStats {
    /// Count a reported step and return it.
    pub fn record(&mut self, step: Step) -> StepResult {
        self.steps += 1;
        match step.action {
            Action::Swap => self.swaps += 1,
            Action::Shift => self.shifts += 1,
            Action::Insert => self.writes += 1,
            Action::Compare | Action::Select => {}
        }
        StepResult::Progressed(step)
    }

    /// Number of steps that reordered values.
    #[must_use]
    pub const fn mutations(&self) -> u64 {
        self.swaps + self.shifts
    }
}

/// A resumable sorting algorithm.
///
/// The stepper owns only its progress markers. The sequence is passed in on
/// every call and must keep the length it had when the stepper was created.
pub trait SortStepper<T: SortValue>: fmt::Debug {
    /// Algorithm implemented by this stepper.
    fn algorithm(&self) -> Algorithm;

    /// Order captured at creation.
    fn order(&self) -> Order;

    /// Perform one unit of work on `values`.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvalidState` if the stepper already reported
    /// `Done` or if `values` has a different length than at creation.
    fn advance(&mut self, values: &mut [T]) -> SortResult<StepResult>;

    /// Check whether `Done` has been reported.
    fn is_done(&self) -> bool;

    /// Work counters so far.
    fn stats(&self) -> SortStats;
}

/// Shared lifecycle check run at the top of every `advance`.
pub(crate) fn ensure_active(
    algorithm: Algorithm,
    done: bool,
    expected_len: usize,
    actual_len: usize,
) -> SortResult<()> {
    if done {
        return Err(SortError::invalid_state(format!(
            "{} stepper advanced after completion",
            algorithm.name()
        )));
    }
    if expected_len != actual_len {
        return Err(SortError::invalid_state(format!(
            "{} stepper created for {expected_len} values but advanced on {actual_len}",
            algorithm.name()
        )));
    }
    Ok(())
}

/// The supported sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Adjacent-swap bubble sort.
    #[default]
    Bubble,
    /// Shift-based insertion sort.
    Insertion,
    /// Scan-and-swap selection sort.
    Selection,
}

impl Algorithm {
    /// All algorithms in menu order (key `1`, `2`, `3`).
    pub const ALL: [Self; 3] = [Self::Insertion, Self::Bubble, Self::Selection];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Insertion => "Insertion Sort",
            Self::Selection => "Selection Sort",
        }
    }

    /// Menu key selecting this algorithm.
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::Insertion => '1',
            Self::Bubble => '2',
            Self::Selection => '3',
        }
    }

    /// Algorithm bound to a menu key.
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }

    /// Build a stepper for a sequence of `len` values.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvalidConfiguration` for an empty sequence.
    pub fn stepper<T: SortValue>(
        self,
        len: usize,
        order: Order,
        granularity: Granularity,
    ) -> SortResult<Box<dyn SortStepper<T>>> {
        if len == 0 {
            return Err(SortError::invalid_config(
                "cannot sort an empty sequence",
            ));
        }
        let stepper: Box<dyn SortStepper<T>> = match self {
            Self::Bubble => Box::new(BubbleStepper::new(len, order, granularity)),
            Self::Insertion => Box::new(InsertionStepper::<T>::new(len, order)),
            Self::Selection => Box::new(SelectionStepper::new(len, order, granularity)),
        };
        Ok(stepper)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.trim_end_matches(" sort").trim_end_matches("_sort") {
            "bubble" | "2" => Ok(Self::Bubble),
            "insertion" | "1" => Ok(Self::Insertion),
            "selection" | "3" => Ok(Self::Selection),
            _ => Err(SortError::invalid_config(format!(
                "unknown algorithm '{s}' (expected bubble, insertion or selection)"
            ))),
        }
    }
}

/// Result of [`StepSource::advance`].
#[derive(Debug, PartialEq, Eq)]
pub enum Advance<'s, T> {
    /// One unit of work was done.
    Progressed(Step),
    /// The borrowed sequence is now sorted.
    Done(&'s [T]),
}

/// A stepper bound to the sequence it sorts.
///
/// Borrows the sequence mutably for its whole lifetime, so nothing else can
/// resize or reorder it mid-sort.
#[derive(Debug)]
pub struct StepSource<'a, T: SortValue> {
    values: &'a mut [T],
    stepper: Box<dyn SortStepper<T>>,
}

impl<'a, T: SortValue> StepSource<'a, T> {
    /// Start sorting `values` with native step granularity.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvalidConfiguration` for an empty sequence.
    pub fn new(values: &'a mut [T], algorithm: Algorithm, order: Order) -> SortResult<Self> {
        Self::with_granularity(values, algorithm, order, Granularity::Native)
    }

    /// Start sorting `values` with the given step granularity.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvalidConfiguration` for an empty sequence.
    pub fn with_granularity(
        values: &'a mut [T],
        algorithm: Algorithm,
        order: Order,
        granularity: Granularity,
    ) -> SortResult<Self> {
        let stepper = algorithm.stepper(values.len(), order, granularity)?;
        Ok(Self { values, stepper })
    }

    /// Resume the sort for one unit of work.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvalidState` when called after `Done`.
    pub fn advance(&mut self) -> SortResult<Advance<'_, T>> {
        match self.stepper.advance(&mut *self.values)? {
            StepResult::Progressed(step) => Ok(Advance::Progressed(step)),
            StepResult::Done => Ok(Advance::Done(&*self.values)),
        }
    }

    /// Advance until `Done`, collecting every reported step.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvalidState` if the source was already done.
    pub fn run_to_completion(&mut self) -> SortResult<Vec<Step>> {
        let mut steps = Vec::new();
        loop {
            match self.stepper.advance(&mut *self.values)? {
                StepResult::Progressed(step) => steps.push(step),
                StepResult::Done => return Ok(steps),
            }
        }
    }

    /// Current contents of the sequence.
    #[must_use]
    pub fn values(&self) -> &[T] {
        self.values
    }

    /// Work counters so far.
    #[must_use]
    pub fn stats(&self) -> SortStats {
        self.stepper.stats()
    }

    /// Check whether `Done` has been reported.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.stepper.is_done()
    }

    /// Algorithm being run.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.stepper.algorithm()
    }

    /// Order captured at creation.
    #[must_use]
    pub fn order(&self) -> Order {
        self.stepper.order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_predicate() {
        assert!(Order::Ascending.out_of_order(&3, &1));
        assert!(!Order::Ascending.out_of_order(&1, &3));
        assert!(!Order::Ascending.out_of_order(&2, &2));
        assert!(Order::Descending.out_of_order(&1, &3));
        assert!(!Order::Descending.out_of_order(&2, &2));
    }

    #[test]
    fn test_order_is_sorted() {
        assert!(Order::Ascending.is_sorted(&[1, 2, 2, 5]));
        assert!(!Order::Ascending.is_sorted(&[2, 1]));
        assert!(Order::Descending.is_sorted(&[5, 2, 2, 1]));
        assert!(Order::Descending.is_sorted::<u32>(&[]));
    }

    #[test]
    fn test_order_parse() {
        assert_eq!("asc".parse::<Order>().ok(), Some(Order::Ascending));
        assert_eq!("Descending".parse::<Order>().ok(), Some(Order::Descending));
        assert!("sideways".parse::<Order>().is_err());
    }

    #[test]
    fn test_inversions() {
        assert_eq!(inversions(&[5, 3, 4, 1, 2], Order::Ascending), 8);
        assert_eq!(inversions(&[1, 2, 3], Order::Ascending), 0);
        assert_eq!(inversions(&[1, 2, 3], Order::Descending), 3);
        assert_eq!(inversions(&[2, 2, 2], Order::Descending), 0);
    }

    #[test]
    fn test_highlights_pair_distinct() {
        let h = Highlights::pair(3, 4);
        assert_eq!(h.len(), 2);
        assert_eq!(h.role_of(3), Some(Role::Primary));
        assert_eq!(h.role_of(4), Some(Role::Secondary));
        assert_eq!(h.role_of(5), None);
    }

    #[test]
    fn test_highlights_pair_same_index_keeps_secondary() {
        let h = Highlights::pair(2, 2);
        assert_eq!(h.len(), 1);
        assert_eq!(h.role_of(2), Some(Role::Secondary));
    }

    #[test]
    fn test_highlights_fresh_per_call() {
        let first = Highlights::new().with(0, Role::Primary);
        let second = Highlights::new();
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn test_highlights_serialize_as_list() {
        let json = serde_json::to_string(&Highlights::pair(0, 1)).expect("serialize");
        assert_eq!(
            json,
            r#"[{"index":0,"role":"primary"},{"index":1,"role":"secondary"}]"#
        );
    }

    #[test]
    fn test_action_mutation() {
        assert!(Action::Swap.is_mutation());
        assert!(Action::Shift.is_mutation());
        assert!(!Action::Insert.is_mutation());
        assert!(!Action::Compare.is_mutation());
        assert!(!Action::Select.is_mutation());
    }

    #[test]
    fn test_stats_record() {
        let mut stats = SortStats::default();
        let _ = stats.record(Step::new(Action::Swap, Highlights::pair(0, 1)));
        let _ = stats.record(Step::new(Action::Shift, Highlights::pair(0, 1)));
        let _ = stats.record(Step::new(Action::Insert, Highlights::pair(0, 1)));
        let _ = stats.record(Step::new(Action::Select, Highlights::pair(0, 0)));
        assert_eq!(stats.steps, 4);
        assert_eq!(stats.swaps, 1);
        assert_eq!(stats.shifts, 1);
        assert_eq!(stats.writes, 1);
        assert_eq!(stats.mutations(), 2);
    }

    #[test]
    fn test_algorithm_keys() {
        assert_eq!(Algorithm::from_key('1'), Some(Algorithm::Insertion));
        assert_eq!(Algorithm::from_key('2'), Some(Algorithm::Bubble));
        assert_eq!(Algorithm::from_key('3'), Some(Algorithm::Selection));
        assert_eq!(Algorithm::from_key('4'), None);
    }

    #[test]
    fn test_algorithm_parse() {
        assert_eq!("bubble".parse::<Algorithm>().ok(), Some(Algorithm::Bubble));
        assert_eq!(
            "Insertion Sort".parse::<Algorithm>().ok(),
            Some(Algorithm::Insertion)
        );
        assert_eq!(
            "selection_sort".parse::<Algorithm>().ok(),
            Some(Algorithm::Selection)
        );
        assert!("quick".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_algorithm_rejects_empty_sequence() {
        let result = Algorithm::Bubble.stepper::<u32>(0, Order::Ascending, Granularity::Native);
        assert!(matches!(
            result,
            Err(SortError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_step_source_empty_rejected() {
        let mut values: Vec<u32> = Vec::new();
        let result = StepSource::new(&mut values, Algorithm::Selection, Order::Ascending);
        assert!(result.is_err());
    }

    #[test]
    fn test_step_source_done_returns_sorted_slice() {
        let mut values = vec![3u32, 1, 2];
        let mut source =
            StepSource::new(&mut values, Algorithm::Insertion, Order::Descending).expect("source");
        let steps = source.run_to_completion().expect("run");
        assert!(!steps.is_empty());
        assert!(source.is_done());
        assert_eq!(source.values(), &[3, 2, 1]);
        assert!(matches!(source.advance(), Err(SortError::InvalidState { .. })));
        drop(source);
        assert_eq!(values, vec![3, 2, 1]);
    }

    #[test]
    fn test_step_source_reports_order_and_algorithm() {
        let mut values = vec![1u32, 2];
        let source = StepSource::new(&mut values, Algorithm::Selection, Order::Descending)
            .expect("source");
        assert_eq!(source.algorithm(), Algorithm::Selection);
        assert_eq!(source.order(), Order::Descending);
        assert!(!source.is_done());
    }

    #[test]
    fn test_every_algorithm_sorts_both_orders() {
        for algorithm in Algorithm::ALL {
            for order in [Order::Ascending, Order::Descending] {
                for granularity in [Granularity::Native, Granularity::EveryComparison] {
                    let mut values = vec![9u32, 4, 7, 4, 1, 8, 2, 2, 6];
                    let mut expected = values.clone();
                    expected.sort_unstable();
                    if order == Order::Descending {
                        expected.reverse();
                    }
                    let mut source =
                        StepSource::with_granularity(&mut values, algorithm, order, granularity)
                            .expect("source");
                    source.run_to_completion().expect("run");
                    drop(source);
                    assert_eq!(values, expected, "{algorithm} {order} {granularity:?}");
                }
            }
        }
    }
}
