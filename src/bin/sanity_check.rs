//! Command line sanity check for CSV training data.
//!
//! Usage: `sanity_check [CONFIG.toml|CONFIG.json] DATA.csv`
//!
//! Without a config argument, `data_sanity.toml` in the working directory is
//! used when present, otherwise the defaults. `DATA_SANITY_*` environment
//! variables override either. Exits with status 1 when validation fails.

use anyhow::{bail, Context};
use data_sanity::config::DEFAULT_CONFIG_FILE;
use data_sanity::{ColumnRole, CsvLoader, CsvLoaderConfig, DataValidator, ValidationConfig};
use std::path::{Path, PathBuf};
use std::process;

fn load_config(path: Option<&Path>) -> anyhow::Result<ValidationConfig> {
    let mut config = match path {
        Some(path) => ValidationConfig::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            ValidationConfig::load_from_file(DEFAULT_CONFIG_FILE)
                .with_context(|| format!("loading config from {}", DEFAULT_CONFIG_FILE))?
        }
        None => ValidationConfig::default(),
    };
    config
        .apply_environment_overrides()
        .context("applying environment overrides")?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    data_sanity::init()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, data_path) = match args.as_slice() {
        [data] => (None, PathBuf::from(data)),
        [config, data] => (Some(PathBuf::from(config)), PathBuf::from(data)),
        _ => bail!("usage: sanity_check [CONFIG.toml|CONFIG.json] DATA.csv"),
    };

    let config = load_config(config_path.as_deref())?;

    let vector_columns: Vec<String> = if config.feature_shards.is_empty() {
        config
            .column_mapping
            .physical(ColumnRole::Features)
            .map(str::to_string)
            .into_iter()
            .collect()
    } else {
        config.feature_shards.iter().cloned().collect()
    };
    let loader_config = CsvLoaderConfig::new()
        .with_vector_columns(vector_columns)
        .with_num_partitions(config.effective_num_threads());
    let dataset = CsvLoader::new(loader_config)
        .load_path(&data_path)
        .with_context(|| format!("loading data from {}", data_path.display()))?;

    let validator = DataValidator::new(config)?;
    match validator.validate_tabular(&dataset) {
        Ok(()) => {
            println!(
                "{}: {} rows passed {} checks",
                data_path.display(),
                dataset.num_rows(),
                validator.config().task_type
            );
            Ok(())
        }
        Err(err) if !err.messages().is_empty() => {
            eprintln!("{}", err);
            process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}
