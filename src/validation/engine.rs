//! Partition-parallel reduction of checks to pass/fail outcomes.
//!
//! Every check is reduced over the whole dataset with logical AND, seeded
//! with `true`. Each partition is folded sequentially into a
//! [`CheckAccumulator`] holding one boolean per check, and partition results
//! are merged pairwise. AND is associative and commutative, so neither the
//! partitioning nor the merge order affects the outcome. Only one boolean per
//! check survives the fold; failing records are never retained.

use crate::core::traits::{PartitionSource, Predicate};
use rayon::prelude::*;

/// Per-check pass state, combined across partitions with logical AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckAccumulator {
    passed: Vec<bool>,
}

impl CheckAccumulator {
    /// Identity of the merge: every check passing.
    pub fn all_passed(num_checks: usize) -> Self {
        CheckAccumulator {
            passed: vec![true; num_checks],
        }
    }

    /// Fold one item into the accumulator.
    ///
    /// Checks that already failed are not re-evaluated.
    pub fn observe<T, P>(&mut self, checks: &[P], item: &T)
    where
        P: Predicate<T>,
    {
        for (passed, check) in self.passed.iter_mut().zip(checks) {
            if *passed && !check.holds(item) {
                *passed = false;
            }
        }
    }

    /// Combine two partial results.
    pub fn merge(mut self, other: CheckAccumulator) -> CheckAccumulator {
        debug_assert_eq!(self.passed.len(), other.passed.len());
        for (lhs, rhs) in self.passed.iter_mut().zip(other.passed) {
            *lhs = *lhs && rhs;
        }
        self
    }

    /// Whether every check has already failed.
    pub fn all_failed(&self) -> bool {
        self.passed.iter().all(|passed| !passed)
    }

    /// Whether every check passed.
    pub fn all_passed_so_far(&self) -> bool {
        self.passed.iter().all(|&passed| passed)
    }

    /// Pass state per check, in check order.
    pub fn passed(&self) -> &[bool] {
        &self.passed
    }

    /// Messages of the failed checks, in check order.
    pub fn failed_messages<T, P>(&self, checks: &[P]) -> Vec<String>
    where
        P: Predicate<T>,
    {
        self.passed
            .iter()
            .zip(checks)
            .filter(|(&passed, _)| !passed)
            .map(|(_, check)| check.message().to_string())
            .collect()
    }
}

/// Fold a single partition sequentially.
///
/// Stops early once every check has failed.
pub fn fold_partition<'a, T, P, I>(items: I, checks: &[P]) -> CheckAccumulator
where
    T: 'a,
    P: Predicate<T>,
    I: IntoIterator<Item = &'a T>,
{
    let mut accumulator = CheckAccumulator::all_passed(checks.len());
    if checks.is_empty() {
        return accumulator;
    }
    for item in items {
        accumulator.observe(checks, item);
        if accumulator.all_failed() {
            break;
        }
    }
    accumulator
}

/// Evaluate every check over every partition of `source`.
///
/// Partitions are folded on the current rayon pool; an empty source yields
/// all checks passing.
pub fn evaluate<T, P, S>(source: &S, checks: &[P]) -> CheckAccumulator
where
    S: PartitionSource<T> + ?Sized,
    P: Predicate<T>,
{
    let num_checks = checks.len();
    (0..source.num_partitions())
        .into_par_iter()
        .map(|index| fold_partition(source.partition_iter(index), checks))
        .reduce(
            || CheckAccumulator::all_passed(num_checks),
            CheckAccumulator::merge,
        )
}

/// Messages of the checks that failed on at least one item of `source`.
pub fn failed_messages<T, P, S>(source: &S, checks: &[P]) -> Vec<String>
where
    S: PartitionSource<T> + ?Sized,
    P: Predicate<T>,
{
    let outcome = evaluate(source, checks);
    for (check, passed) in checks.iter().zip(outcome.passed()) {
        log::debug!(
            "{}: {}",
            if *passed { "passed" } else { "FAILED" },
            check.message()
        );
    }
    outcome.failed_messages::<T, P>(checks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::partition::PartitionedDataset;

    #[derive(Debug)]
    struct Below(i32, &'static str);

    impl Predicate<i32> for Below {
        fn holds(&self, item: &i32) -> bool {
            *item < self.0
        }

        fn message(&self) -> &str {
            self.1
        }
    }

    fn checks() -> Vec<Below> {
        vec![Below(100, "below 100"), Below(10, "below 10"), Below(1000, "below 1000")]
    }

    #[test]
    fn test_failed_messages_in_check_order() {
        let dataset = PartitionedDataset::from_items((0..50).collect(), 4).unwrap();
        assert_eq!(failed_messages(&dataset, &checks()), vec!["below 10".to_string()]);
    }

    #[test]
    fn test_single_failure_in_one_partition() {
        let mut items: Vec<i32> = vec![1; 999];
        items.push(500);
        let dataset = PartitionedDataset::from_items(items, 7).unwrap();
        let outcome = evaluate(&dataset, &checks());
        assert_eq!(outcome.passed(), &[false, false, true]);
    }

    #[test]
    fn test_empty_dataset_passes() {
        let dataset: PartitionedDataset<i32> = PartitionedDataset::empty();
        assert!(evaluate(&dataset, &checks()).all_passed_so_far());

        let empty_partitions: PartitionedDataset<i32> = PartitionedDataset::new(vec![vec![], vec![]]);
        assert!(failed_messages(&empty_partitions, &checks()).is_empty());
    }

    #[test]
    fn test_no_checks() {
        let dataset = PartitionedDataset::from_items(vec![1, 2, 3], 2).unwrap();
        let outcome = evaluate::<i32, Below, _>(&dataset, &[]);
        assert!(outcome.passed().is_empty());
    }

    #[test]
    fn test_merge_is_and() {
        let mut a = CheckAccumulator::all_passed(3);
        a.observe(&checks(), &50);
        let mut b = CheckAccumulator::all_passed(3);
        b.observe(&checks(), &500);

        assert_eq!(a.clone().merge(b.clone()), b.clone().merge(a.clone()));
        assert_eq!(a.merge(b).passed(), &[false, false, true]);
    }

    #[test]
    fn test_fold_partition_stops_when_all_failed() {
        let outcome = fold_partition(&[5000, 1, 2], &checks());
        assert!(outcome.all_failed());
    }
}
