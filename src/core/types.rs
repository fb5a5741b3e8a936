//! Core data types for the data sanity engine.
//!
//! This module defines the enumerations that drive validation: which training
//! task the data is destined for, how much of the data to inspect, and which
//! logical role a tabular column plays.

use crate::core::error::SanityError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Feature index type for sparse feature mappings.
pub type FeatureIndex = usize;

/// Identifier of one named group of feature columns in a tabular dataset.
///
/// A shard identifier is the physical column name holding that group's
/// feature vector.
pub type FeatureShardId = String;

/// Training task the dataset will be fed into.
///
/// The task determines which label-shape constraint applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Linear regression (finite labels)
    LinearRegression,
    /// Logistic regression (binary labels)
    LogisticRegression,
    /// Poisson regression (finite, non-negative labels)
    PoissonRegression,
    /// Linear SVM with smoothed hinge loss (binary labels)
    SmoothedHingeSvm,
    /// No training task; carries no validator set
    None,
}

impl Default for TaskType {
    fn default() -> Self {
        TaskType::LinearRegression
    }
}

impl TaskType {
    /// Configuration string for this task type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::LinearRegression => "linear_regression",
            TaskType::LogisticRegression => "logistic_regression",
            TaskType::PoissonRegression => "poisson_regression",
            TaskType::SmoothedHingeSvm => "smoothed_hinge_svm",
            TaskType::None => "none",
        }
    }

    /// Whether this task trains a binary classifier.
    pub fn is_binary_classification(&self) -> bool {
        matches!(
            self,
            TaskType::LogisticRegression | TaskType::SmoothedHingeSvm
        )
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = SanityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear_regression" => Ok(TaskType::LinearRegression),
            "logistic_regression" => Ok(TaskType::LogisticRegression),
            "poisson_regression" => Ok(TaskType::PoissonRegression),
            "smoothed_hinge_svm" | "smoothed_hinge_loss_linear_svm" => {
                Ok(TaskType::SmoothedHingeSvm)
            }
            "none" => Ok(TaskType::None),
            other => Err(SanityError::unsupported_task_type(other)),
        }
    }
}

/// How much of a dataset to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationIntensity {
    /// Evaluate every record
    Full,
    /// Evaluate a uniform random sample of records
    Sampled,
    /// Skip evaluation entirely
    Disabled,
}

impl Default for ValidationIntensity {
    fn default() -> Self {
        ValidationIntensity::Full
    }
}

impl ValidationIntensity {
    /// Configuration string for this intensity.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationIntensity::Full => "full",
            ValidationIntensity::Sampled => "sampled",
            ValidationIntensity::Disabled => "disabled",
        }
    }
}

impl fmt::Display for ValidationIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationIntensity {
    type Err = SanityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "validate_full" => Ok(ValidationIntensity::Full),
            "sampled" | "sample" | "validate_sample" => Ok(ValidationIntensity::Sampled),
            "disabled" | "validate_disabled" => Ok(ValidationIntensity::Disabled),
            other => Err(SanityError::invalid_parameter(
                "intensity",
                other,
                "expected one of full, sampled, disabled",
            )),
        }
    }
}

/// Logical role of a column in a tabular dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Response variable
    Label,
    /// Feature vector (fanned out per feature shard)
    Features,
    /// Per-record offset
    Offset,
    /// Per-record weight
    Weight,
}

impl ColumnRole {
    /// All recognized roles.
    pub const ALL: [ColumnRole; 4] = [
        ColumnRole::Label,
        ColumnRole::Features,
        ColumnRole::Offset,
        ColumnRole::Weight,
    ];
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Label => write!(f, "label"),
            ColumnRole::Features => write!(f, "features"),
            ColumnRole::Offset => write!(f, "offset"),
            ColumnRole::Weight => write!(f, "weight"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_type_round_trip_strings() {
        for task in [
            TaskType::LinearRegression,
            TaskType::LogisticRegression,
            TaskType::PoissonRegression,
            TaskType::SmoothedHingeSvm,
            TaskType::None,
        ] {
            assert_eq!(task.as_str().parse::<TaskType>().unwrap(), task);
        }
    }

    #[test]
    fn test_unknown_task_type() {
        let err = "gamma_regression".parse::<TaskType>().unwrap_err();
        assert!(matches!(err, SanityError::UnsupportedTaskType { .. }));
    }

    #[test]
    fn test_intensity_parsing() {
        assert_eq!(
            "FULL".parse::<ValidationIntensity>().unwrap(),
            ValidationIntensity::Full
        );
        assert_eq!(
            "validate_sample".parse::<ValidationIntensity>().unwrap(),
            ValidationIntensity::Sampled
        );
        assert!("sometimes".parse::<ValidationIntensity>().is_err());
    }

    #[test]
    fn test_binary_classification_tasks() {
        assert!(TaskType::LogisticRegression.is_binary_classification());
        assert!(TaskType::SmoothedHingeSvm.is_binary_classification());
        assert!(!TaskType::PoissonRegression.is_binary_classification());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&TaskType::SmoothedHingeSvm).unwrap();
        assert_eq!(json, "\"smoothed_hinge_svm\"");
        let role: ColumnRole = serde_json::from_str("\"weight\"").unwrap();
        assert_eq!(role, ColumnRole::Weight);
    }
}
