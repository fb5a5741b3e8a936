//! Dataset representations for the data sanity engine.
//!
//! Two input representations are supported: partitioned strongly-typed
//! [`Record`]s, and [`TabularDataset`]s whose rows are addressed by column
//! name. Both are read-only to the validation engine.

pub mod loader;
pub mod partition;
pub mod record;
pub mod tabular;
pub mod vector;

pub use loader::{CsvLoader, CsvLoaderConfig};
pub use partition::PartitionedDataset;
pub use record::Record;
pub use tabular::{Row, Schema, TabularDataset, TabularDatasetBuilder, Value};
pub use vector::{FeatureVector, SparseVector};
