//! Validation configuration and its builder.
//!
//! A [`ValidationConfig`] carries everything a sanity check consumes besides
//! the data itself: the task type, the intensity, sampling parameters, the
//! worker count, and for tabular input the column mapping and feature shards.
//! It can be built in code, read from a JSON or TOML file, or overridden from
//! environment variables.

use crate::config::columns::ColumnMapping;
use crate::core::constants::*;
use crate::core::error::{Result, SanityError};
use crate::core::types::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Environment variable overriding the task type
pub const ENV_TASK_TYPE: &str = "DATA_SANITY_TASK_TYPE";
/// Environment variable overriding the validation intensity
pub const ENV_INTENSITY: &str = "DATA_SANITY_INTENSITY";
/// Environment variable overriding the sample fraction
pub const ENV_SAMPLE_FRACTION: &str = "DATA_SANITY_SAMPLE_FRACTION";
/// Environment variable fixing the sampling seed
pub const ENV_SAMPLE_SEED: &str = "DATA_SANITY_SAMPLE_SEED";
/// Environment variable overriding the worker count
pub const ENV_NUM_THREADS: &str = "DATA_SANITY_NUM_THREADS";

/// Configuration of one data sanity check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Training task the data is checked for
    pub task_type: TaskType,
    /// How much of the data is evaluated
    pub intensity: ValidationIntensity,
    /// Fraction of records evaluated at sampled intensity, in (0, 1]
    pub sample_fraction: f64,
    /// Fixed sampling seed; a fresh one is drawn per call when absent
    pub sample_seed: Option<u64>,
    /// Worker threads (0 = all available cores)
    pub num_threads: usize,
    /// Feature shard columns checked for finiteness in tabular input
    pub feature_shards: BTreeSet<FeatureShardId>,
    /// Logical-to-physical column names for tabular input
    pub column_mapping: ColumnMapping,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            task_type: TaskType::default(),
            intensity: ValidationIntensity::default(),
            sample_fraction: DEFAULT_SAMPLE_FRACTION,
            sample_seed: None,
            num_threads: DEFAULT_NUM_THREADS,
            feature_shards: BTreeSet::new(),
            column_mapping: ColumnMapping::default(),
        }
    }
}

impl ValidationConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder from default values
    pub fn builder() -> ValidationConfigBuilder {
        ValidationConfigBuilder::new()
    }

    /// Validate parameter ranges and names
    pub fn validate(&self) -> Result<()> {
        if self.sample_fraction.is_nan() || self.sample_fraction <= 0.0 || self.sample_fraction > 1.0 {
            return Err(SanityError::invalid_parameter(
                "sample_fraction",
                self.sample_fraction.to_string(),
                "must be in range (0.0, 1.0]",
            ));
        }

        for (role, name) in self.column_mapping.iter() {
            if name.trim().is_empty() {
                return Err(SanityError::invalid_parameter(
                    format!("column_mapping.{}", role),
                    format!("{:?}", name),
                    "column name must not be empty",
                ));
            }
        }

        if self.feature_shards.iter().any(|shard| shard.trim().is_empty()) {
            return Err(SanityError::invalid_parameter(
                "feature_shards",
                format!("{:?}", self.feature_shards),
                "shard identifiers must not be empty",
            ));
        }

        Ok(())
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SanityError::config(format!("Failed to read config file: {}", e)))?;

        let config: ValidationConfig = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| SanityError::config(format!("Failed to parse JSON config: {}", e)))?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| SanityError::config(format!("Failed to parse TOML config: {}", e)))?,
            _ => {
                return Err(SanityError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file
    ///
    /// TOML has no null, so a configuration with an unmapped column role can
    /// only be saved as JSON.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| SanityError::config(format!("Failed to serialize to JSON: {}", e)))?,
            Some("toml") => {
                let unmapped: Vec<String> = self
                    .column_mapping
                    .unmapped_roles()
                    .map(|role| role.to_string())
                    .collect();
                if !unmapped.is_empty() {
                    return Err(crate::config_error!(
                        "Unmapped column roles cannot be saved as TOML: {}; use .json",
                        unmapped.join(", ")
                    ));
                }
                toml::to_string_pretty(self).map_err(|e| {
                    SanityError::config(format!("Failed to serialize to TOML: {}", e))
                })?
            }
            _ => {
                return Err(SanityError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        std::fs::write(path, content)
            .map_err(|e| SanityError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn load_from_environment() -> Result<Self> {
        let mut config = ValidationConfig::default();
        config.apply_environment_overrides()?;
        Ok(config)
    }

    /// Override fields whose environment variable is set
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var(ENV_TASK_TYPE) {
            self.task_type = val.parse()?;
        }

        if let Ok(val) = std::env::var(ENV_INTENSITY) {
            self.intensity = val.parse()?;
        }

        if let Ok(val) = std::env::var(ENV_SAMPLE_FRACTION) {
            self.sample_fraction = val
                .parse()
                .map_err(|_| crate::config_error!("Invalid {}", ENV_SAMPLE_FRACTION))?;
        }

        if let Ok(val) = std::env::var(ENV_SAMPLE_SEED) {
            self.sample_seed = Some(
                val.parse()
                    .map_err(|_| crate::config_error!("Invalid {}", ENV_SAMPLE_SEED))?,
            );
        }

        if let Ok(val) = std::env::var(ENV_NUM_THREADS) {
            self.num_threads = val
                .parse()
                .map_err(|_| crate::config_error!("Invalid {}", ENV_NUM_THREADS))?;
        }

        self.validate()
    }

    /// Get the effective number of threads (0 means use all available cores)
    pub fn effective_num_threads(&self) -> usize {
        if self.num_threads == 0 {
            num_cpus::get()
        } else {
            self.num_threads
        }
    }
}

/// Configuration builder for fluent configuration creation
#[derive(Debug, Clone)]
pub struct ValidationConfigBuilder {
    config: ValidationConfig,
    validation_errors: Vec<String>,
}

impl ValidationConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        ValidationConfigBuilder {
            config: ValidationConfig::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the task type
    pub fn task_type(mut self, task_type: TaskType) -> Self {
        self.config.task_type = task_type;
        self
    }

    /// Set the validation intensity
    pub fn intensity(mut self, intensity: ValidationIntensity) -> Self {
        self.config.intensity = intensity;
        self
    }

    /// Set the sample fraction
    pub fn sample_fraction(mut self, fraction: f64) -> Self {
        if !(fraction > 0.0 && fraction <= 1.0) {
            self.validation_errors
                .push("sample_fraction must be in range (0.0, 1.0]".to_string());
        }
        self.config.sample_fraction = fraction;
        self
    }

    /// Fix the sampling seed
    pub fn sample_seed(mut self, seed: u64) -> Self {
        self.config.sample_seed = Some(seed);
        self
    }

    /// Set the number of worker threads
    pub fn num_threads(mut self, threads: usize) -> Self {
        self.config.num_threads = threads;
        self
    }

    /// Replace the whole column mapping
    pub fn column_mapping(mut self, mapping: ColumnMapping) -> Self {
        self.config.column_mapping = mapping;
        self
    }

    /// Map one logical role to a physical column
    pub fn column<S: Into<String>>(mut self, role: ColumnRole, name: S) -> Self {
        let name = name.into();
        if name.trim().is_empty() {
            self.validation_errors
                .push(format!("column name for {} must not be empty", role));
        }
        self.config.column_mapping = self.config.column_mapping.with(role, name);
        self
    }

    /// Leave one logical role unmapped
    pub fn unmap(mut self, role: ColumnRole) -> Self {
        self.config.column_mapping = self.config.column_mapping.without(role);
        self
    }

    /// Add a feature shard
    pub fn feature_shard<S: Into<String>>(mut self, shard: S) -> Self {
        let shard = shard.into();
        if shard.trim().is_empty() {
            self.validation_errors
                .push("feature shard identifiers must not be empty".to_string());
        }
        self.config.feature_shards.insert(shard);
        self
    }

    /// Add several feature shards
    pub fn feature_shards<I, S>(self, shards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        shards
            .into_iter()
            .fold(self, |builder, shard| builder.feature_shard(shard))
    }

    /// Build the configuration
    pub fn build(self) -> Result<ValidationConfig> {
        if !self.validation_errors.is_empty() {
            return Err(SanityError::config(format!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ValidationConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
