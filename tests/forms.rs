use std::io::Write;

use linear_diagnosis::features::{feature_names, SAMPLE_MALIGNANT};
use linear_diagnosis::parse::{read_form_csv, read_form_json};
use linear_diagnosis::{Diagnosis, ModelParameters, ScoreError, Scorer};

#[test]
fn csv_form_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "feature,value").unwrap();
    for (name, value) in feature_names().zip(SAMPLE_MALIGNANT) {
        writeln!(file, "{name},{value}").unwrap();
    }
    file.flush().unwrap();

    let features = read_form_csv(file.path()).unwrap();
    assert_eq!(features, SAMPLE_MALIGNANT);
}

#[test]
fn json_form_from_disk() {
    let object: serde_json::Map<String, serde_json::Value> = feature_names()
        .zip(SAMPLE_MALIGNANT)
        .map(|(name, value)| (name.to_string(), serde_json::Value::from(value)))
        .collect();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", serde_json::Value::Object(object)).unwrap();
    file.flush().unwrap();

    assert_eq!(read_form_json(file.path()).unwrap(), SAMPLE_MALIGNANT);
}

#[test]
fn missing_form_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let error = read_form_csv(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(error, ScoreError::Io { .. }));
}

#[test]
fn model_file_switches_orientation() {
    let mut parameters = ModelParameters::default();
    parameters.positive_class = Diagnosis::Benign;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.toml");
    std::fs::write(&path, parameters.to_toml_string().unwrap()).unwrap();

    let loaded = ModelParameters::load(&path).unwrap();
    assert_eq!(loaded, parameters);

    let result = Scorer::new(loaded).evaluate(&SAMPLE_MALIGNANT);
    assert_eq!(result.label, Diagnosis::Malignant);
}

#[test]
fn malformed_model_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.toml");
    std::fs::write(&path, "bias = 0.1\nmeans = [1.0]\n").unwrap();

    assert!(matches!(
        ModelParameters::load(&path),
        Err(ScoreError::Toml(_))
    ));
}
