//! Schema-flexible tabular datasets.
//!
//! A [`TabularDataset`] is a partitioned collection of [`Row`]s sharing one
//! [`Schema`]. Columns are addressed by physical name; which column plays
//! which logical role is decided by a column mapping at validation time, so
//! the same dataset type serves any naming convention.

use crate::core::constants::DEFAULT_NUM_PARTITIONS;
use crate::core::error::{Result, SanityError};
use crate::dataset::partition::PartitionedDataset;
use crate::dataset::vector::{FeatureVector, SparseVector};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// A single cell of a tabular row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Missing value
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point
    Double(f64),
    /// Free text
    Text(String),
    /// Feature vector
    Vector(FeatureVector),
}

impl Value {
    /// Numeric value of a scalar cell.
    ///
    /// Returns `None` for nulls, text, booleans and vectors.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(value) => Some(*value),
            Value::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Feature vector held by a vector cell.
    pub fn as_vector(&self) -> Option<&FeatureVector> {
        match self {
            Value::Vector(vector) => Some(vector),
            _ => None,
        }
    }

    /// Whether the cell is missing.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<FeatureVector> for Value {
    fn from(vector: FeatureVector) -> Self {
        Value::Vector(vector)
    }
}

impl From<SparseVector> for Value {
    fn from(vector: SparseVector) -> Self {
        Value::Vector(FeatureVector::Sparse(vector))
    }
}

impl From<Array1<f64>> for Value {
    fn from(values: Array1<f64>) -> Self {
        Value::Vector(FeatureVector::Dense(values))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Ordered column names of a tabular dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Create a schema; names must be non-empty and unique.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(columns.len());

        for (position, name) in columns.iter().enumerate() {
            if name.is_empty() {
                return Err(SanityError::invalid_parameter(
                    format!("columns[{}]", position),
                    "",
                    "column names must be non-empty",
                ));
            }
            if index.insert(name.clone(), position).is_some() {
                return Err(SanityError::invalid_parameter(
                    "columns",
                    name.as_str(),
                    "column names must be unique",
                ));
            }
        }

        Ok(Schema { columns, index })
    }

    /// Position of a column.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Whether the schema has a column of this name.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One row of a tabular dataset: an ordered mapping from column name to value.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl Row {
    /// Create a row; `values` must match the schema's width.
    pub fn new(schema: Arc<Schema>, values: Vec<Value>) -> Result<Self> {
        if values.len() != schema.len() {
            return Err(SanityError::dimension_mismatch(
                format!("{} values", schema.len()),
                format!("{} values", values.len()),
            ));
        }
        Ok(Row { schema, values })
    }

    /// Value of a column by name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.schema
            .index_of(column)
            .and_then(|position| self.values.get(position))
    }

    /// Value of a column by position.
    pub fn value_at(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    /// Schema shared by this row.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Values in column order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Iterate over `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.schema
            .columns()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

/// Partitioned rows sharing one schema.
#[derive(Debug, Clone)]
pub struct TabularDataset {
    schema: Arc<Schema>,
    rows: PartitionedDataset<Row>,
}

impl TabularDataset {
    /// Create a dataset from pre-split partitions of raw values.
    pub fn new(schema: Schema, partitions: Vec<Vec<Vec<Value>>>) -> Result<Self> {
        let schema = Arc::new(schema);
        let partitions = partitions
            .into_iter()
            .map(|partition| {
                partition
                    .into_iter()
                    .map(|values| Row::new(Arc::clone(&schema), values))
                    .collect::<Result<Vec<Row>>>()
            })
            .collect::<Result<Vec<Vec<Row>>>>()?;

        Ok(TabularDataset {
            schema,
            rows: PartitionedDataset::new(partitions),
        })
    }

    /// Start building a dataset with the given columns.
    pub fn builder<I, S>(columns: I) -> TabularDatasetBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TabularDatasetBuilder::new(columns)
    }

    /// Schema shared by every row.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Whether the schema has a column of this name.
    pub fn has_column(&self, column: &str) -> bool {
        self.schema.contains(column)
    }

    /// Partitioned rows.
    pub fn rows(&self) -> &PartitionedDataset<Row> {
        &self.rows
    }

    /// Total number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of partitions.
    pub fn num_partitions(&self) -> usize {
        self.rows.num_partitions()
    }
}

/// Builder for [`TabularDataset`].
#[derive(Debug, Clone)]
pub struct TabularDatasetBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    num_partitions: usize,
    validation_errors: Vec<String>,
}

impl TabularDatasetBuilder {
    /// Create a builder for the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TabularDatasetBuilder {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            num_partitions: DEFAULT_NUM_PARTITIONS,
            validation_errors: Vec::new(),
        }
    }

    /// Set the number of partitions rows are split into.
    pub fn num_partitions(mut self, num_partitions: usize) -> Self {
        if num_partitions == 0 {
            self.validation_errors
                .push("num_partitions must be at least 1".to_string());
        }
        self.num_partitions = num_partitions;
        self
    }

    /// Append a row of values in column order.
    pub fn row(mut self, values: Vec<Value>) -> Self {
        if values.len() != self.columns.len() {
            self.validation_errors.push(format!(
                "row {} has {} values, expected {}",
                self.rows.len(),
                values.len(),
                self.columns.len()
            ));
        }
        self.rows.push(values);
        self
    }

    /// Append many rows.
    pub fn rows<I>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<Value>>,
    {
        for values in rows {
            self = self.row(values);
        }
        self
    }

    /// Build the dataset.
    pub fn build(self) -> Result<TabularDataset> {
        if !self.validation_errors.is_empty() {
            return Err(SanityError::data_loading(format!(
                "Tabular dataset construction failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        let schema = Schema::new(self.columns)?;
        let partitions =
            PartitionedDataset::from_items(self.rows, self.num_partitions)?.into_partitions();
        TabularDataset::new(schema, partitions)
    }
}
