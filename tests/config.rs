//! Configuration loading, saving and validation.

use data_sanity::*;
use tempfile::TempDir;

#[test]
fn test_config_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sanity.json");

    let config = ValidationConfig::builder()
        .task_type(TaskType::SmoothedHingeSvm)
        .intensity(ValidationIntensity::Sampled)
        .sample_fraction(0.2)
        .num_threads(4)
        .unmap(ColumnRole::Offset)
        .feature_shards(["global", "per_item"])
        .build()
        .unwrap();
    config.save_to_file(&path).unwrap();

    let loaded = ValidationConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.column_mapping.physical(ColumnRole::Offset), None);
}

#[test]
fn test_config_toml_keeps_mapping_or_refuses() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sanity.toml");

    let remapped = ValidationConfig::builder()
        .task_type(TaskType::PoissonRegression)
        .column(ColumnRole::Label, "clicks")
        .build()
        .unwrap();
    remapped.save_to_file(&path).unwrap();
    assert_eq!(ValidationConfig::load_from_file(&path).unwrap(), remapped);

    let unmapped = ValidationConfig::builder()
        .unmap(ColumnRole::Offset)
        .build()
        .unwrap();
    let err = unmapped.save_to_file(&path).unwrap_err();
    assert_eq!(err.category(), "config");
    // The earlier file is left untouched.
    assert_eq!(ValidationConfig::load_from_file(&path).unwrap(), remapped);
}

#[test]
fn test_config_file_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sanity.toml");
    std::fs::write(&path, "sample_fraction = 0.0\n").unwrap();
    assert!(ValidationConfig::load_from_file(&path).is_err());

    std::fs::write(&path, "task_type = \"ranking\"\n").unwrap();
    let err = ValidationConfig::load_from_file(&path).unwrap_err();
    assert_eq!(err.category(), "config");
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let err = ValidationConfig::load_from_file(dir.path().join("absent.toml")).unwrap_err();
    assert_eq!(err.category(), "config");
}

#[test]
fn test_task_and_intensity_strings() {
    for (text, task) in [
        ("linear_regression", TaskType::LinearRegression),
        ("logistic_regression", TaskType::LogisticRegression),
        ("poisson_regression", TaskType::PoissonRegression),
        ("smoothed_hinge_svm", TaskType::SmoothedHingeSvm),
        ("none", TaskType::None),
    ] {
        assert_eq!(text.parse::<TaskType>().unwrap(), task);
        assert_eq!(task.to_string(), text);
    }
    for (text, intensity) in [
        ("full", ValidationIntensity::Full),
        ("sampled", ValidationIntensity::Sampled),
        ("disabled", ValidationIntensity::Disabled),
    ] {
        assert_eq!(text.parse::<ValidationIntensity>().unwrap(), intensity);
    }
    assert!("sometimes".parse::<ValidationIntensity>().is_err());
}

#[test]
fn test_validator_uses_configured_fraction() {
    let config = ValidationConfig::builder()
        .intensity(ValidationIntensity::Sampled)
        .sample_fraction(1.0)
        .build()
        .unwrap();
    let validator = DataValidator::new(config).unwrap();

    // Sampling everything catches a single bad record.
    let records = vec![
        Record::new(1.0, SparseVector::zeros(1)),
        Record::new(f64::NAN, SparseVector::zeros(1)),
    ];
    let dataset = PartitionedDataset::from_items(records, 2).unwrap();
    let err = validator.validate_records(&dataset).unwrap_err();
    assert_eq!(err.messages(), [NON_FINITE_LABEL_MESSAGE]);
}
