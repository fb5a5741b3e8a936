//! CSV loader producing tabular datasets.
//!
//! Scalar cells are parsed as numbers when possible and kept as text
//! otherwise; empty cells become [`Value::Null`]. Columns listed as vector
//! columns hold sparse feature vectors written as space-separated
//! `index:value` pairs, e.g. `0:1.5 7:-2.0`.

use crate::core::constants::DEFAULT_NUM_PARTITIONS;
use crate::core::error::{Result, SanityError};
use crate::dataset::tabular::{Schema, TabularDataset, Value};
use crate::dataset::vector::SparseVector;
use crate::dataset::partition::PartitionedDataset;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

/// CSV loader configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvLoaderConfig {
    /// Field delimiter
    pub delimiter: u8,
    /// Number of partitions to split rows into
    pub num_partitions: usize,
    /// Columns holding sparse feature vectors
    pub vector_columns: BTreeSet<String>,
    /// Trim whitespace from fields
    pub trim: bool,
}

impl Default for CsvLoaderConfig {
    fn default() -> Self {
        CsvLoaderConfig {
            delimiter: b',',
            num_partitions: DEFAULT_NUM_PARTITIONS,
            vector_columns: BTreeSet::new(),
            trim: true,
        }
    }
}

impl CsvLoaderConfig {
    /// Create a new loader configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark columns as sparse feature vector columns
    pub fn with_vector_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vector_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the number of partitions
    pub fn with_num_partitions(mut self, num_partitions: usize) -> Self {
        self.num_partitions = num_partitions;
        self
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Loads headered CSV data into a [`TabularDataset`].
#[derive(Debug, Clone, Default)]
pub struct CsvLoader {
    config: CsvLoaderConfig,
}

impl CsvLoader {
    /// Create a loader with the given configuration
    pub fn new(config: CsvLoaderConfig) -> Self {
        CsvLoader { config }
    }

    /// Load a CSV file
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<TabularDataset> {
        let path = path.as_ref();
        log::info!("Loading tabular data from {}", path.display());
        let file = std::fs::File::open(path)?;
        self.load_reader(file)
    }

    /// Load CSV data from any reader
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<TabularDataset> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.config.delimiter)
            .trim(if self.config.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let schema = Schema::new(headers.iter())?;

        let vector_positions: Vec<bool> = schema
            .columns()
            .iter()
            .map(|column| self.config.vector_columns.contains(column))
            .collect();
        for column in &self.config.vector_columns {
            if !schema.contains(column) {
                log::warn!("Vector column '{}' not present in CSV header", column);
            }
        }

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            let values = record
                .iter()
                .zip(&vector_positions)
                .map(|(field, &is_vector)| {
                    if is_vector {
                        parse_sparse_vector(field).map_err(|e| {
                            SanityError::data_loading(format!("row {}: {}", line + 1, e))
                        })
                    } else {
                        Ok(parse_scalar(field))
                    }
                })
                .collect::<Result<Vec<Value>>>()?;
            rows.push(values);
        }

        log::debug!(
            "Parsed {} rows with {} columns into {} partitions",
            rows.len(),
            schema.len(),
            self.config.num_partitions
        );

        let partitions =
            PartitionedDataset::from_items(rows, self.config.num_partitions)?.into_partitions();
        TabularDataset::new(schema, partitions)
    }
}

fn parse_scalar(field: &str) -> Value {
    if field.is_empty() {
        return Value::Null;
    }
    if let Ok(value) = field.parse::<i64>() {
        return Value::Int(value);
    }
    match field.parse::<f64>() {
        Ok(value) => Value::Double(value),
        Err(_) => Value::Text(field.to_string()),
    }
}

fn parse_sparse_vector(field: &str) -> Result<Value> {
    if field.is_empty() {
        return Ok(Value::Null);
    }

    let pairs = field
        .split_whitespace()
        .map(|token| {
            let (index, value) = token.split_once(':').ok_or_else(|| {
                SanityError::data_loading(format!("malformed feature entry '{}'", token))
            })?;
            let index = index.parse::<usize>().map_err(|_| {
                SanityError::data_loading(format!("malformed feature index '{}'", index))
            })?;
            let value = value.parse::<f64>().map_err(|_| {
                SanityError::data_loading(format!("malformed feature value '{}'", value))
            })?;
            Ok((index, value))
        })
        .collect::<Result<Vec<(usize, f64)>>>()?;

    let size = match pairs.iter().map(|&(index, _)| index).max() {
        Some(max_index) => max_index.checked_add(1).ok_or_else(|| {
            SanityError::data_loading(format!("feature index {} out of range", max_index))
        })?,
        None => 0,
    };
    Ok(Value::from(SparseVector::from_pairs(size, pairs)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
response,features,weight,name
1,0:1.5 3:-2.0,1.0,a
-1,,2.5,b
1,1:NaN,,c
";

    #[test]
    fn test_load_reader() {
        let loader = CsvLoader::new(
            CsvLoaderConfig::new()
                .with_vector_columns(["features"])
                .with_num_partitions(2),
        );
        let dataset = loader.load_reader(CSV.as_bytes()).unwrap();

        assert_eq!(dataset.num_rows(), 3);
        assert_eq!(dataset.num_partitions(), 2);
        assert_eq!(dataset.schema().columns(), &["response", "features", "weight", "name"]);

        let rows: Vec<_> = dataset.rows().iter().collect();
        assert_eq!(rows[0].get("response"), Some(&Value::Int(1)));
        let features = rows[0].get("features").and_then(Value::as_vector).unwrap();
        assert_eq!(features.len(), 4);
        assert!(rows[1].get("features").unwrap().is_null());
        assert!(rows[2].get("weight").unwrap().is_null());
        assert_eq!(rows[2].get("name"), Some(&Value::Text("c".to_string())));
    }

    #[test]
    fn test_out_of_range_index_is_a_loading_error() {
        let loader = CsvLoader::new(CsvLoaderConfig::new().with_vector_columns(["features"]));
        let csv = format!("response,features\n1,{}:1.0\n", usize::MAX);
        let err = loader.load_reader(csv.as_bytes()).unwrap_err();
        assert_eq!(err.category(), "data_loading");
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_non_finite_values_parse() {
        assert!(matches!(parse_scalar("NaN"), Value::Double(v) if v.is_nan()));
        assert!(matches!(parse_scalar("inf"), Value::Double(v) if v.is_infinite()));
        assert_eq!(parse_scalar("2.5"), Value::Double(2.5));
    }

    #[test]
    fn test_malformed_vector_rejected() {
        assert!(parse_sparse_vector("3").is_err());
        assert!(parse_sparse_vector("x:1").is_err());
        assert!(parse_sparse_vector("1:y").is_err());
        assert!(parse_sparse_vector("-1:1.0").is_err());

        let err = parse_sparse_vector(&format!("{}:1.0", usize::MAX)).unwrap_err();
        assert_eq!(err.category(), "data_loading");
    }
}
