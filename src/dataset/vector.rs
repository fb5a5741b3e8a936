//! Feature vector representations.
//!
//! Records carry a [`SparseVector`]: a mapping from feature index to value in
//! which absent indices are implicitly zero. Tabular feature columns may hold
//! either a sparse or a dense vector, wrapped in [`FeatureVector`].

use crate::core::error::{Result, SanityError};
use crate::core::types::FeatureIndex;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Sparse mapping from feature index to value.
///
/// Indices are kept sorted and unique. Deserialized vectors go through the
/// same checks as [`SparseVector::new`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "SparseVectorParts")]
pub struct SparseVector {
    size: usize,
    indices: Vec<FeatureIndex>,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct SparseVectorParts {
    size: usize,
    indices: Vec<FeatureIndex>,
    values: Vec<f64>,
}

impl TryFrom<SparseVectorParts> for SparseVector {
    type Error = SanityError;

    fn try_from(parts: SparseVectorParts) -> Result<Self> {
        SparseVector::new(parts.size, parts.indices, parts.values)
    }
}

impl SparseVector {
    /// Create a sparse vector from parallel index and value arrays.
    ///
    /// Indices must be strictly increasing and below `size`.
    pub fn new(size: usize, indices: Vec<FeatureIndex>, values: Vec<f64>) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(SanityError::dimension_mismatch(
                format!("indices: {}", indices.len()),
                format!("values: {}", values.len()),
            ));
        }
        if let Some(window) = indices.windows(2).find(|w| w[0] >= w[1]) {
            return Err(SanityError::invalid_parameter(
                "indices",
                format!("{} >= {}", window[0], window[1]),
                "must be strictly increasing",
            ));
        }
        if let Some(&last) = indices.last() {
            if last >= size {
                return Err(SanityError::invalid_parameter(
                    "indices",
                    last.to_string(),
                    format!("must be below vector size {}", size),
                ));
            }
        }

        Ok(SparseVector {
            size,
            indices,
            values,
        })
    }

    /// Create a sparse vector from unordered `(index, value)` pairs.
    ///
    /// Duplicate indices are rejected.
    pub fn from_pairs<I>(size: usize, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (FeatureIndex, f64)>,
    {
        let mut pairs: Vec<(FeatureIndex, f64)> = pairs.into_iter().collect();
        pairs.sort_by_key(|&(index, _)| index);
        let (indices, values) = pairs.into_iter().unzip();
        Self::new(size, indices, values)
    }

    /// An all-zero vector of the given size.
    pub fn zeros(size: usize) -> Self {
        SparseVector {
            size,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Logical length of the vector.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the vector has logical length zero.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of explicitly stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Stored indices, sorted.
    pub fn indices(&self) -> &[FeatureIndex] {
        &self.indices
    }

    /// Stored values, aligned with [`indices`](Self::indices).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at `index`, zero when not stored.
    pub fn get(&self, index: FeatureIndex) -> f64 {
        self.indices
            .binary_search(&index)
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }

    /// Iterate over stored `(index, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureIndex, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }
}

/// Feature vector stored in a tabular column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureVector {
    /// Every component stored
    Dense(Array1<f64>),
    /// Only non-zero components stored
    Sparse(SparseVector),
}

impl FeatureVector {
    /// Logical length of the vector.
    pub fn len(&self) -> usize {
        match self {
            FeatureVector::Dense(values) => values.len(),
            FeatureVector::Sparse(vector) => vector.len(),
        }
    }

    /// Whether the vector has logical length zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `test` holds for every stored component.
    ///
    /// Implicit zeros of a sparse vector are not visited.
    pub fn all_components<F>(&self, test: F) -> bool
    where
        F: FnMut(&f64) -> bool,
    {
        match self {
            FeatureVector::Dense(values) => values.iter().all(test),
            FeatureVector::Sparse(vector) => vector.values().iter().all(test),
        }
    }
}

impl From<SparseVector> for FeatureVector {
    fn from(vector: SparseVector) -> Self {
        FeatureVector::Sparse(vector)
    }
}

impl From<Array1<f64>> for FeatureVector {
    fn from(values: Array1<f64>) -> Self {
        FeatureVector::Dense(values)
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        FeatureVector::Dense(Array1::from_vec(values))
    }
}
