//! Partitioned collections for the data sanity engine.
//!
//! A [`PartitionedDataset`] holds items split into independent partitions.
//! Partitions are the unit of parallel work: each is folded sequentially by
//! one worker and the partial results are merged afterwards.

use crate::core::error::{Result, SanityError};
use crate::core::traits::PartitionSource;
use std::iter;

/// Items split into independently processed partitions.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionedDataset<T> {
    partitions: Vec<Vec<T>>,
}

impl<T> PartitionedDataset<T> {
    /// Create a dataset from pre-split partitions.
    pub fn new(partitions: Vec<Vec<T>>) -> Self {
        PartitionedDataset { partitions }
    }

    /// A dataset with no partitions.
    pub fn empty() -> Self {
        PartitionedDataset {
            partitions: Vec::new(),
        }
    }

    /// Split `items` into `num_partitions` contiguous partitions of near-equal size.
    pub fn from_items(items: Vec<T>, num_partitions: usize) -> Result<Self> {
        if num_partitions == 0 {
            return Err(SanityError::invalid_parameter(
                "num_partitions",
                "0",
                "must be at least 1",
            ));
        }

        let total = items.len();
        let base = total / num_partitions;
        let remainder = total % num_partitions;

        let mut partitions = Vec::with_capacity(num_partitions);
        let mut items = items.into_iter();
        for index in 0..num_partitions {
            let size = base + usize::from(index < remainder);
            partitions.push(items.by_ref().take(size).collect());
        }

        Ok(PartitionedDataset { partitions })
    }

    /// Redistribute items round-robin into `num_partitions` partitions.
    pub fn repartition(self, num_partitions: usize) -> Result<Self> {
        if num_partitions == 0 {
            return Err(SanityError::invalid_parameter(
                "num_partitions",
                "0",
                "must be at least 1",
            ));
        }

        let mut partitions: Vec<Vec<T>> = iter::repeat_with(Vec::new).take(num_partitions).collect();
        for (position, item) in self.partitions.into_iter().flatten().enumerate() {
            partitions[position % num_partitions].push(item);
        }

        Ok(PartitionedDataset { partitions })
    }

    /// Number of partitions.
    pub fn num_partitions(&self) -> usize {
        self.partitions.len()
    }

    /// Total number of items across partitions.
    pub fn len(&self) -> usize {
        self.partitions.iter().map(Vec::len).sum()
    }

    /// Whether the dataset holds no items.
    pub fn is_empty(&self) -> bool {
        self.partitions.iter().all(Vec::is_empty)
    }

    /// All partitions.
    pub fn partitions(&self) -> &[Vec<T>] {
        &self.partitions
    }

    /// One partition, if it exists.
    pub fn partition(&self, index: usize) -> Option<&[T]> {
        self.partitions.get(index).map(Vec::as_slice)
    }

    /// Number of items in each partition.
    pub fn partition_sizes(&self) -> Vec<usize> {
        self.partitions.iter().map(Vec::len).collect()
    }

    /// Iterate over every item, partition by partition.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.partitions.iter().flatten()
    }

    /// Consume the dataset, returning its partitions.
    pub fn into_partitions(self) -> Vec<Vec<T>> {
        self.partitions
    }
}

impl<T> Default for PartitionedDataset<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Sync> PartitionSource<T> for PartitionedDataset<T> {
    fn num_partitions(&self) -> usize {
        self.partitions.len()
    }

    fn partition_iter(&self, index: usize) -> Box<dyn Iterator<Item = &T> + Send + '_> {
        match self.partitions.get(index) {
            Some(partition) => Box::new(partition.iter()),
            None => Box::new(iter::empty()),
        }
    }

    fn num_items(&self) -> usize {
        self.len()
    }
}
