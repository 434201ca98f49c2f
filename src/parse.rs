use csv::ReaderBuilder;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use crate::error::{FieldError, FieldErrorReason, Result, ScoreError};
use crate::features::{feature_index, FEATURES};

pub const DIMENSIONS: usize = 30;

pub type Features = [f64; DIMENSIONS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Diagnosis {
    Malignant,
    Benign,
}

impl Diagnosis {
    pub fn opposite(self) -> Diagnosis {
        match self {
            Diagnosis::Malignant => Diagnosis::Benign,
            Diagnosis::Benign => Diagnosis::Malignant,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Diagnosis::Malignant => "malignant",
            Diagnosis::Benign => "benign",
        }
    }
}

impl std::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected diagnosis {0:?}")]
pub struct UnknownDiagnosis(pub String);

impl FromStr for Diagnosis {
    type Err = UnknownDiagnosis;

    fn from_str(diagnosis: &str) -> std::result::Result<Self, Self::Err> {
        match diagnosis.trim().to_ascii_lowercase().as_str() {
            "m" | "malignant" => Ok(Diagnosis::Malignant),
            "b" | "benign" => Ok(Diagnosis::Benign),
            _ => Err(UnknownDiagnosis(diagnosis.to_string())),
        }
    }
}

/// Splits a `name=value` form argument.
pub fn parse_field_arg(arg: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {arg:?}"))?;

    Ok((name.trim().to_string(), value.to_string()))
}

fn parse_value(raw: &str) -> std::result::Result<f64, FieldErrorReason> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldErrorReason::Missing);
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| FieldErrorReason::NotNumeric(raw.to_string()))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(FieldErrorReason::NotFinite)
    }
}

/// Builds the ordered feature vector from named form values.
///
/// Every problem is collected before failing so the error names all bad
/// fields at once: unknown names, repeated names, unparsable or non-finite
/// values, and features that never showed up.
pub fn features_from_fields<I, K, V>(fields: I) -> Result<Features>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut values: [Option<std::result::Result<f64, FieldErrorReason>>; DIMENSIONS] =
        std::array::from_fn(|_| None);
    let mut extra = Vec::new();

    for (name, raw) in fields {
        let name = name.as_ref().trim();

        match feature_index(name) {
            None => extra.push(FieldError {
                feature: name.to_string(),
                reason: FieldErrorReason::Unknown,
            }),
            Some(index) if values[index].is_some() => extra.push(FieldError {
                feature: name.to_string(),
                reason: FieldErrorReason::Duplicate,
            }),
            Some(index) => values[index] = Some(parse_value(raw.as_ref())),
        }
    }

    let mut features = [0.0; DIMENSIONS];
    let mut errors = Vec::new();
    let mut filled = 0;

    for (index, value) in values.into_iter().enumerate() {
        match value {
            Some(Ok(value)) => {
                features[index] = value;
                filled += 1;
            }
            Some(Err(reason)) => errors.push(FieldError {
                feature: FEATURES[index].key.to_string(),
                reason,
            }),
            None => errors.push(FieldError {
                feature: FEATURES[index].key.to_string(),
                reason: FieldErrorReason::Missing,
            }),
        }
    }

    errors.extend(extra);

    if errors.is_empty() {
        Ok(features)
    } else {
        tracing::warn!(rejected = errors.len(), filled, "rejected form input");
        Err(ScoreError::InvalidInput {
            fields: errors,
            filled,
        })
    }
}

/// Checks an already-numeric, positional vector.
pub fn features_from_slice(values: &[f64]) -> Result<Features> {
    let features: Features = values
        .try_into()
        .map_err(|_| ScoreError::WrongFeatureCount {
            actual: values.len(),
        })?;

    let errors: Vec<_> = features
        .iter()
        .zip(FEATURES.iter())
        .filter(|(value, _)| !value.is_finite())
        .map(|(_, feature)| FieldError {
            feature: feature.key.to_string(),
            reason: FieldErrorReason::NotFinite,
        })
        .collect();

    if errors.is_empty() {
        Ok(features)
    } else {
        Err(ScoreError::InvalidInput {
            filled: DIMENSIONS - errors.len(),
            fields: errors,
        })
    }
}

/// Reads a two-column `feature,value` CSV with a header row.
pub fn form_from_csv_reader<R: Read>(reader: R) -> Result<Features> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    const NAME_FIELD_INDEX: usize = 0;
    const VALUE_FIELD_INDEX: usize = 1;

    let mut fields = Vec::new();

    for result in reader.records() {
        let record = result?;

        let Some(name) = record.get(NAME_FIELD_INDEX) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let value = record.get(VALUE_FIELD_INDEX).unwrap_or_default();

        fields.push((name.to_string(), value.to_string()));
    }

    features_from_fields(fields)
}

pub fn read_form_csv(file_path: &Path) -> Result<Features> {
    let file = File::open(file_path).map_err(|source| ScoreError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;

    form_from_csv_reader(BufReader::new(file))
}

/// JSON form entries in document order. Repeated keys are kept so they can
/// be reported instead of silently overwritten.
struct JsonForm(Vec<(String, serde_json::Value)>);

impl<'de> Deserialize<'de> for JsonForm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct FormVisitor;

        impl<'de> Visitor<'de> for FormVisitor {
            type Value = JsonForm;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an object of feature values")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<JsonForm, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(DIMENSIONS));
                while let Some(entry) = map.next_entry::<String, serde_json::Value>()? {
                    entries.push(entry);
                }
                Ok(JsonForm(entries))
            }
        }

        deserializer.deserialize_map(FormVisitor)
    }
}

/// Reads a JSON object of `feature: value`. Values may be numbers or
/// numeric strings; `null` counts as an empty field. Numbers keep their
/// literal text, so out-of-range values are reported per feature.
pub fn form_from_json_str(json: &str) -> Result<Features> {
    let JsonForm(entries) = serde_json::from_str(json)?;

    let fields = entries.into_iter().filter_map(|(name, value)| {
        let raw = match value {
            serde_json::Value::Null => return None,
            serde_json::Value::Number(number) => number.to_string(),
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        };
        Some((name, raw))
    });

    features_from_fields(fields)
}

pub fn read_form_json(file_path: &Path) -> Result<Features> {
    let json = std::fs::read_to_string(file_path).map_err(|source| ScoreError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;

    form_from_json_str(&json)
}
