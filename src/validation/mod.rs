//! Data sanity validation.
//!
//! A sanity check runs in four steps:
//!
//! 1. [`registry`] resolves the task type to an ordered list of checks,
//!    failing fast on a task without a validator set;
//! 2. [`intensity`] selects which records are evaluated;
//! 3. [`engine`] reduces every check over every partition in parallel;
//! 4. [`gate`] turns the failed checks' messages into an error.
//!
//! [`sanity_check`] and [`sanity_check_tabular`] run the steps with default
//! settings. [`DataValidator`] runs them with a [`ValidationConfig`] and an
//! optional dedicated thread pool.

pub mod check;
pub mod engine;
pub mod gate;
pub mod intensity;
pub mod predicates;
pub mod registry;

pub use check::{BoundCheck, Check, TabularCheck};
pub use engine::{evaluate, failed_messages, CheckAccumulator};
pub use gate::gate;
pub use intensity::{select, DatasetView, IntensityController, SampledDataset};
pub use registry::{checks_for, checks_for_tabular};

use crate::config::{ColumnMapping, ValidationConfig};
use crate::core::error::{Result, SanityError};
use crate::core::types::{FeatureShardId, TaskType, ValidationIntensity};
use crate::dataset::partition::PartitionedDataset;
use crate::dataset::record::Record;
use crate::dataset::tabular::TabularDataset;
use std::collections::BTreeSet;

/// Check a partitioned record dataset for `task_type`.
///
/// Returns normally when every evaluated record passes every check, and
/// [`SanityError::ValidationFailure`] listing each failed check otherwise.
/// Sampled intensity evaluates a fresh 10% sample per call.
pub fn sanity_check(
    dataset: &PartitionedDataset<Record>,
    task_type: TaskType,
    intensity: ValidationIntensity,
) -> Result<()> {
    check_records(dataset, task_type, intensity, &IntensityController::default())
}

/// Check a tabular dataset for `task_type`.
///
/// Columns are located through `column_mapping`; the feature check runs once
/// per shard in `feature_shards`, or against the mapped features column when
/// the set is empty. Absent columns pass.
pub fn sanity_check_tabular(
    dataset: &TabularDataset,
    task_type: TaskType,
    intensity: ValidationIntensity,
    column_mapping: &ColumnMapping,
    feature_shards: &BTreeSet<FeatureShardId>,
) -> Result<()> {
    check_tabular(
        dataset,
        task_type,
        intensity,
        &IntensityController::default(),
        column_mapping,
        feature_shards,
    )
}

fn check_records(
    dataset: &PartitionedDataset<Record>,
    task_type: TaskType,
    intensity: ValidationIntensity,
    controller: &IntensityController,
) -> Result<()> {
    let checks = checks_for(task_type)?;
    log::info!(
        "Sanity checking {} records in {} partitions for {} at {} intensity ({} checks)",
        dataset.len(),
        dataset.num_partitions(),
        task_type,
        intensity,
        checks.len()
    );
    if intensity == ValidationIntensity::Disabled {
        log::info!("Data validation disabled; skipping");
    }

    let view = controller.select(dataset, intensity);
    gate(failed_messages(&view, &checks))
}

fn check_tabular(
    dataset: &TabularDataset,
    task_type: TaskType,
    intensity: ValidationIntensity,
    controller: &IntensityController,
    column_mapping: &ColumnMapping,
    feature_shards: &BTreeSet<FeatureShardId>,
) -> Result<()> {
    let checks = checks_for_tabular(task_type)?;
    log::info!(
        "Sanity checking {} rows in {} partitions for {} at {} intensity ({} checks, {} feature shards)",
        dataset.num_rows(),
        dataset.num_partitions(),
        task_type,
        intensity,
        checks.len(),
        feature_shards.len()
    );
    if intensity == ValidationIntensity::Disabled {
        log::info!("Data validation disabled; skipping");
    }

    let bound: Vec<BoundCheck> = checks
        .iter()
        .map(|check| check.bind(dataset.schema(), column_mapping, feature_shards))
        .collect();
    let view = controller.select(dataset.rows(), intensity);
    gate(failed_messages(&view, &bound))
}

/// Reusable validator bound to one configuration.
///
/// With a non-zero `num_threads` the validator owns a dedicated rayon pool;
/// otherwise checks run on the global pool.
#[derive(Debug)]
pub struct DataValidator {
    config: ValidationConfig,
    controller: IntensityController,
    thread_pool: Option<rayon::ThreadPool>,
}

impl DataValidator {
    /// Create a validator from a configuration, validating it first.
    pub fn new(config: ValidationConfig) -> Result<Self> {
        config.validate()?;
        let controller = IntensityController::new(config.sample_fraction, config.sample_seed)?;

        let thread_pool = if config.num_threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.num_threads)
                .build()
                .map_err(|e| SanityError::threading(format!("Failed to create thread pool: {}", e)))?;
            Some(pool)
        } else {
            None
        };

        log::debug!(
            "Created data validator for {} using {} threads",
            config.task_type,
            config.effective_num_threads()
        );

        Ok(DataValidator {
            config,
            controller,
            thread_pool,
        })
    }

    /// Configuration this validator runs with.
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Check a partitioned record dataset.
    pub fn validate_records(&self, dataset: &PartitionedDataset<Record>) -> Result<()> {
        self.install(|| {
            check_records(
                dataset,
                self.config.task_type,
                self.config.intensity,
                &self.controller,
            )
        })
    }

    /// Check a tabular dataset with the configured column mapping and shards.
    pub fn validate_tabular(&self, dataset: &TabularDataset) -> Result<()> {
        self.install(|| {
            check_tabular(
                dataset,
                self.config.task_type,
                self.config.intensity,
                &self.controller,
                &self.config.column_mapping,
                &self.config.feature_shards,
            )
        })
    }

    fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.thread_pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}
