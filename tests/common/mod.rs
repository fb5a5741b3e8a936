//! Common test utilities for data sanity integration tests.
#![allow(dead_code)]

use data_sanity::*;
use rand::prelude::*;
use std::fs;
use std::path::Path;

/// Number of features in generated records
pub const NUM_FEATURES: usize = 16;

/// Create a random sparse feature vector with finite values
pub fn create_test_features(rng: &mut StdRng) -> SparseVector {
    let mut pairs = Vec::new();
    for index in 0..NUM_FEATURES {
        if rng.gen_bool(0.3) {
            pairs.push((index, rng.gen_range(-5.0..5.0)));
        }
    }
    SparseVector::from_pairs(NUM_FEATURES, pairs).unwrap()
}

/// Create valid records for binary classification (labels +1 / -1)
pub fn create_binary_records(num_records: usize, seed: u64) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_records)
        .map(|_| {
            let label = if rng.gen_bool(0.5) {
                POSITIVE_CLASS_LABEL
            } else {
                NEGATIVE_CLASS_LABEL
            };
            Record::new(label, create_test_features(&mut rng))
                .with_offset(rng.gen_range(-1.0..1.0))
                .with_weight(rng.gen_range(0.1..3.0))
        })
        .collect()
}

/// Create valid records for Poisson regression (non-negative counts)
pub fn create_count_records(num_records: usize, seed: u64) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_records)
        .map(|_| {
            let label = rng.gen_range(0..20) as f64;
            Record::new(label, create_test_features(&mut rng)).with_weight(rng.gen_range(0.1..3.0))
        })
        .collect()
}

/// Create valid records for linear regression
pub fn create_regression_records(num_records: usize, seed: u64) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_records)
        .map(|_| Record::new(rng.gen_range(-100.0..100.0), create_test_features(&mut rng)))
        .collect()
}

/// Split records into partitions
pub fn partitioned(records: Vec<Record>, num_partitions: usize) -> PartitionedDataset<Record> {
    PartitionedDataset::from_items(records, num_partitions).unwrap()
}

/// Create a tabular dataset with a label, two feature shards and a weight column
pub fn create_sharded_dataset(num_rows: usize, seed: u64) -> TabularDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..num_rows).map(|_| {
        vec![
            Value::from(rng.gen_range(0.0..10.0)),
            Value::from(create_test_features(&mut rng)),
            Value::from(create_test_features(&mut rng)),
            Value::from(rng.gen_range(0.1..3.0)),
        ]
    });
    TabularDataset::builder(["response", "global", "per_user", "weight"])
        .num_partitions(4)
        .rows(rows)
        .build()
        .unwrap()
}

/// Write a CSV file to the given path
pub fn write_csv(path: &Path, header: &str, rows: &[&str]) {
    let mut content = String::from(header);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(path, content).unwrap();
}
