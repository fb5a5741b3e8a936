//! # Data Sanity
//!
//! Pre-training sanity checks for partitioned machine learning datasets.
//!
//! Before a model is trained, every example should carry a label of the shape
//! the task expects and finite features, offsets and weights. This crate
//! evaluates a fixed set of checks over every partition of a dataset in
//! parallel, combines the per-partition outcomes, and fails once with every
//! violated check listed, or returns normally when the data is clean.
//!
//! ## Features
//!
//! - **Task-aware checks**: linear, logistic and Poisson regression and the
//!   smoothed-hinge linear SVM each resolve to an ordered list of checks.
//! - **Partition-parallel evaluation**: each partition is folded sequentially
//!   on a Rayon worker and outcomes are merged with logical AND, so the result
//!   does not depend on partitioning or merge order.
//! - **Validation intensities**: full, sampled (a fresh Bernoulli sample, 10%
//!   by default) or disabled.
//! - **Record and tabular input**: strongly-typed [`Record`]s or schema
//!   addressed [`Row`]s with a [`ColumnMapping`] and per-shard feature checks.
//!
//! ## Quick Start
//!
//! ```rust
//! use data_sanity::{sanity_check, PartitionedDataset, Record, SparseVector};
//! use data_sanity::{TaskType, ValidationIntensity};
//!
//! # fn main() -> data_sanity::Result<()> {
//! let records: Vec<Record> = (0..100)
//!     .map(|i| {
//!         let label = if i % 2 == 0 { 1.0 } else { -1.0 };
//!         Ok(Record::new(label, SparseVector::new(3, vec![0, 2], vec![0.5, 1.5])?))
//!     })
//!     .collect::<data_sanity::Result<_>>()?;
//! let dataset = PartitionedDataset::from_items(records, 4)?;
//!
//! sanity_check(&dataset, TaskType::LogisticRegression, ValidationIntensity::Full)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Tabular input
//!
//! ```rust
//! use data_sanity::{DataValidator, FeatureVector, TabularDataset, ValidationConfig, Value};
//! use data_sanity::{ColumnRole, TaskType};
//!
//! # fn main() -> data_sanity::Result<()> {
//! let config = ValidationConfig::builder()
//!     .task_type(TaskType::PoissonRegression)
//!     .column(ColumnRole::Label, "clicks")
//!     .feature_shard("global")
//!     .build()?;
//!
//! let dataset = TabularDataset::builder(["clicks", "global"])
//!     .row(vec![Value::from(3.0), Value::from(FeatureVector::from(vec![0.1, 0.2]))])
//!     .row(vec![Value::from(-1.0), Value::from(FeatureVector::from(vec![0.3, 0.4]))])
//!     .build()?;
//!
//! let err = DataValidator::new(config)?.validate_tabular(&dataset).unwrap_err();
//! assert_eq!(err.messages(), ["Data contains row(s) with negative label(s)"]);
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/data-sanity/")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Dataset representations and loading
pub mod dataset;

// Checks, registry, reduction engine, intensity and gate
pub mod validation;

// Calibration diagnostics
pub mod diagnostics;

pub use crate::core::{
    constants::*,
    error::{Result, SanityError},
    traits::{PartitionSource, Predicate},
    types::{ColumnRole, FeatureIndex, FeatureShardId, TaskType, ValidationIntensity},
};

pub use config::{ColumnMapping, ValidationConfig, ValidationConfigBuilder};

pub use dataset::{
    CsvLoader, CsvLoaderConfig, FeatureVector, PartitionedDataset, Record, Row, Schema,
    SparseVector, TabularDataset, TabularDatasetBuilder, Value,
};

pub use validation::{
    checks_for, checks_for_tabular, gate, sanity_check, sanity_check_tabular, select, Check,
    DataValidator, DatasetView, IntensityController, TabularCheck,
};

pub use diagnostics::{ProbabilityBin, ProbabilityHistogram};

pub use crate::core::constants::DATA_SANITY_VERSION as VERSION;

/// Initialize logging for the library.
///
/// Installs `env_logger` at `info` level unless `RUST_LOG` says otherwise.
/// Safe to call more than once.
///
/// # Examples
///
/// ```rust
/// fn main() -> data_sanity::Result<()> {
///     data_sanity::init()?;
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    crate::core::initialize_core()
}

/// Check if the library has been initialized.
pub fn is_initialized() -> bool {
    crate::core::is_core_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_initialization() {
        assert!(init().is_ok());
        assert!(is_initialized());
    }

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_integration() {
        let err = SanityError::config("test error");
        assert_eq!(err.category(), "config");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_reexported_registry() {
        let checks = checks_for(TaskType::SmoothedHingeSvm).unwrap();
        assert_eq!(checks.first(), Some(&Check::BinaryLabel));
    }
}
