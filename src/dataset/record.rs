//! Strongly-typed training records.

use crate::dataset::vector::SparseVector;
use serde::{Deserialize, Serialize};

/// A single labeled training example.
///
/// Records are immutable once built; predicates only read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    label: f64,
    features: SparseVector,
    offset: Option<f64>,
    weight: f64,
}

impl Record {
    /// Create a record with unit weight and no offset.
    pub fn new(label: f64, features: SparseVector) -> Self {
        Record {
            label,
            features,
            offset: None,
            weight: 1.0,
        }
    }

    /// Set the offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Response value.
    pub fn label(&self) -> f64 {
        self.label
    }

    /// Sparse feature mapping.
    pub fn features(&self) -> &SparseVector {
        &self.features
    }

    /// Offset, if any.
    pub fn offset(&self) -> Option<f64> {
        self.offset
    }

    /// Sample weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_defaults() {
        let record = Record::new(1.0, SparseVector::zeros(3));
        assert_eq!(record.label(), 1.0);
        assert_eq!(record.weight(), 1.0);
        assert_eq!(record.offset(), None);
        assert_eq!(record.features().nnz(), 0);
    }

    #[test]
    fn test_record_builders() {
        let record = Record::new(0.0, SparseVector::zeros(1))
            .with_offset(0.25)
            .with_weight(3.0);
        assert_eq!(record.offset(), Some(0.25));
        assert_eq!(record.weight(), 3.0);
    }

    #[test]
    fn test_record_rejects_malformed_features() {
        let json = r#"{"label": 1.0, "offset": null, "weight": 1.0,
            "features": {"size": 1, "indices": [7], "values": [0.5]}}"#;
        assert!(serde_json::from_str::<Record>(json).is_err());
    }
}
