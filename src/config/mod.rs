//! Configuration for data sanity checks.
//!
//! [`ValidationConfig`] gathers the task type, intensity, sampling and
//! threading parameters, and for tabular input the [`ColumnMapping`] and the
//! feature shard set. Configurations are validated on build and on load.

pub mod columns;
pub mod core;

pub use self::columns::ColumnMapping;
pub use self::core::{
    ValidationConfig, ValidationConfigBuilder, ENV_INTENSITY, ENV_NUM_THREADS, ENV_SAMPLE_FRACTION,
    ENV_SAMPLE_SEED, ENV_TASK_TYPE,
};

/// Default configuration file name looked up by the command line tool
pub const DEFAULT_CONFIG_FILE: &str = "data_sanity.toml";
