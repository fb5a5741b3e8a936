//! System constants for the data sanity engine.
//!
//! This module defines the class labels recognized as binary, the default
//! sampling fraction, and the fixed diagnostic messages attached to every
//! check.

/// Label value designating the positive class for binary tasks.
pub const POSITIVE_CLASS_LABEL: f64 = 1.0;

/// Label value designating the negative class for binary tasks.
pub const NEGATIVE_CLASS_LABEL: f64 = -1.0;

/// Fraction of records inspected under sampled validation.
pub const DEFAULT_SAMPLE_FRACTION: f64 = 0.10;

/// Default number of threads for parallel validation.
/// 0 means use all available cores.
pub const DEFAULT_NUM_THREADS: usize = 0;

/// Default number of partitions used by the loaders and builders.
pub const DEFAULT_NUM_PARTITIONS: usize = 8;

/// Header line of every validation failure report.
pub const VALIDATION_FAILURE_HEADER: &str = "Data validation failed:";

/// Default physical column holding the label.
pub const DEFAULT_LABEL_COLUMN: &str = "response";

/// Default physical column holding the features.
pub const DEFAULT_FEATURES_COLUMN: &str = "features";

/// Default physical column holding the offset.
pub const DEFAULT_OFFSET_COLUMN: &str = "offset";

/// Default physical column holding the weight.
pub const DEFAULT_WEIGHT_COLUMN: &str = "weight";

// Diagnostic messages, one per check.

/// Reported when any label is NaN or infinite.
pub const NON_FINITE_LABEL_MESSAGE: &str = "Data contains row(s) with non-finite label(s)";

/// Reported when any label is neither the positive nor the negative class.
pub const NON_BINARY_LABEL_MESSAGE: &str = "Data contains row(s) with non-binary label(s)";

/// Reported when any label is negative.
pub const NEGATIVE_LABEL_MESSAGE: &str = "Data contains row(s) with negative label(s)";

/// Reported when any feature value is NaN or infinite.
pub const NON_FINITE_FEATURE_MESSAGE: &str = "Data contains row(s) with non-finite feature(s)";

/// Reported when any offset is NaN or infinite.
pub const NON_FINITE_OFFSET_MESSAGE: &str = "Data contains row(s) with non-finite offset(s)";

/// Reported when any weight is NaN or infinite.
pub const NON_FINITE_WEIGHT_MESSAGE: &str = "Data contains row(s) with non-finite weight(s)";

/// Library version string.
pub const DATA_SANITY_VERSION: &str = env!("CARGO_PKG_VERSION");
