//! Validation intensity: how much of a dataset is actually evaluated.
//!
//! Selection never copies data. [`DatasetView`] borrows the input and decides
//! lazily, per partition, which items the reduction engine sees.

use crate::core::constants::DEFAULT_SAMPLE_FRACTION;
use crate::core::error::{Result, SanityError};
use crate::core::traits::PartitionSource;
use crate::core::types::ValidationIntensity;
use crate::dataset::partition::PartitionedDataset;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::iter;

/// Multiplier spreading partition indices across the seed space.
const PARTITION_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// A Bernoulli sample of a partitioned dataset.
///
/// Each item is kept independently with probability `fraction`, so the
/// sample is drawn without replacement and its size is only expected to
/// match the fraction. Every partition draws from its own generator, seeded
/// from the base seed and the partition index; iterating a partition twice
/// yields the same subset.
#[derive(Debug, Clone, Copy)]
pub struct SampledDataset<'a, T> {
    source: &'a PartitionedDataset<T>,
    fraction: f64,
    seed: u64,
}

impl<'a, T> SampledDataset<'a, T> {
    /// Sample `source` at `fraction`, which must lie in (0, 1].
    pub fn new(source: &'a PartitionedDataset<T>, fraction: f64, seed: u64) -> Result<Self> {
        validate_fraction(fraction)?;
        Ok(SampledDataset {
            source,
            fraction,
            seed,
        })
    }

    /// Sampling fraction.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Base seed the per-partition generators derive from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn partition_rng(&self, index: usize) -> StdRng {
        StdRng::seed_from_u64(self.seed ^ (index as u64).wrapping_mul(PARTITION_SEED_STRIDE))
    }
}

impl<'a, T: Sync> PartitionSource<T> for SampledDataset<'a, T> {
    fn num_partitions(&self) -> usize {
        self.source.num_partitions()
    }

    fn partition_iter(&self, index: usize) -> Box<dyn Iterator<Item = &T> + Send + '_> {
        let partition = match self.source.partition(index) {
            Some(partition) => partition,
            None => return Box::new(iter::empty()),
        };
        let fraction = self.fraction;
        let mut rng = self.partition_rng(index);
        Box::new(partition.iter().filter(move |_| rng.gen_bool(fraction)))
    }
}

/// The items an intensity selects for evaluation.
#[derive(Debug, Clone, Copy)]
pub enum DatasetView<'a, T> {
    /// Every item of the input
    Full(&'a PartitionedDataset<T>),
    /// A random subset of the input
    Sampled(SampledDataset<'a, T>),
    /// No items at all
    Empty,
}

impl<'a, T> DatasetView<'a, T> {
    /// Whether this view can yield no items regardless of input.
    pub fn is_empty_view(&self) -> bool {
        matches!(self, DatasetView::Empty)
    }
}

impl<'a, T: Sync> PartitionSource<T> for DatasetView<'a, T> {
    fn num_partitions(&self) -> usize {
        match self {
            DatasetView::Full(dataset) => dataset.num_partitions(),
            DatasetView::Sampled(sample) => sample.num_partitions(),
            DatasetView::Empty => 0,
        }
    }

    fn partition_iter(&self, index: usize) -> Box<dyn Iterator<Item = &T> + Send + '_> {
        match self {
            DatasetView::Full(dataset) => dataset.partition_iter(index),
            DatasetView::Sampled(sample) => sample.partition_iter(index),
            DatasetView::Empty => Box::new(iter::empty()),
        }
    }
}

/// Maps a [`ValidationIntensity`] to a [`DatasetView`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityController {
    fraction: f64,
    seed: Option<u64>,
}

impl Default for IntensityController {
    fn default() -> Self {
        IntensityController {
            fraction: DEFAULT_SAMPLE_FRACTION,
            seed: None,
        }
    }
}

impl IntensityController {
    /// Controller sampling at `fraction`. Without a seed every call samples
    /// a fresh subset.
    pub fn new(fraction: f64, seed: Option<u64>) -> Result<Self> {
        validate_fraction(fraction)?;
        Ok(IntensityController { fraction, seed })
    }

    /// Sampling fraction used for [`ValidationIntensity::Sampled`].
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Fixed sampling seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Select the items `intensity` asks to evaluate.
    pub fn select<'a, T>(
        &self,
        dataset: &'a PartitionedDataset<T>,
        intensity: ValidationIntensity,
    ) -> DatasetView<'a, T> {
        match intensity {
            ValidationIntensity::Full => DatasetView::Full(dataset),
            ValidationIntensity::Disabled => DatasetView::Empty,
            ValidationIntensity::Sampled => {
                let seed = self.seed.unwrap_or_else(rand::random);
                log::debug!(
                    "Sampling {} partitions at fraction {} with seed {}",
                    dataset.num_partitions(),
                    self.fraction,
                    seed
                );
                DatasetView::Sampled(SampledDataset {
                    source: dataset,
                    fraction: self.fraction,
                    seed,
                })
            }
        }
    }
}

/// Select with the default sampling fraction and a fresh seed.
pub fn select<T>(dataset: &PartitionedDataset<T>, intensity: ValidationIntensity) -> DatasetView<'_, T> {
    IntensityController::default().select(dataset, intensity)
}

fn validate_fraction(fraction: f64) -> Result<()> {
    if fraction.is_nan() || fraction <= 0.0 || fraction > 1.0 {
        return Err(SanityError::invalid_parameter(
            "sample_fraction",
            fraction.to_string(),
            "must be in range (0.0, 1.0]",
        ));
    }
    Ok(())
}
