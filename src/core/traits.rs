//! Core trait definitions for the data sanity engine.
//!
//! Two seams keep the reduction engine independent of where data comes from
//! and what is being checked: [`PartitionSource`] yields the items of one
//! partition at a time, and [`Predicate`] tests one property of one item.

use std::fmt::Debug;

/// A dataset split into independently readable partitions.
///
/// Implementations must allow concurrent reads of distinct partitions from
/// multiple workers.
pub trait PartitionSource<T>: Sync {
    /// Number of partitions.
    fn num_partitions(&self) -> usize;

    /// Iterate over the items of partition `index`.
    ///
    /// An out-of-range index yields an empty iterator.
    fn partition_iter(&self, index: usize) -> Box<dyn Iterator<Item = &T> + Send + '_>;

    /// Total number of items visible through this source.
    fn num_items(&self) -> usize {
        (0..self.num_partitions())
            .map(|index| self.partition_iter(index).count())
            .sum()
    }
}

/// A pure test of one property of one item, paired with a diagnostic message.
///
/// Predicates never fail: `false` is the designed failure signal.
pub trait Predicate<T: ?Sized>: Send + Sync + Debug {
    /// Whether the property holds for `item`.
    fn holds(&self, item: &T) -> bool;

    /// Diagnostic message reported when the predicate fails anywhere.
    fn message(&self) -> &str;
}
