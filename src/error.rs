use std::path::PathBuf;

use crate::parse::DIMENSIONS;

pub type Result<T> = std::result::Result<T, ScoreError>;

/// One rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub feature: String,
    pub reason: FieldErrorReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorReason {
    Missing,
    NotNumeric(String),
    NotFinite,
    Unknown,
    Duplicate,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            FieldErrorReason::Missing => write!(f, "{} is missing", self.feature),
            FieldErrorReason::NotNumeric(raw) => {
                write!(f, "{} is not a number ({raw:?})", self.feature)
            }
            FieldErrorReason::NotFinite => write!(f, "{} is not finite", self.feature),
            FieldErrorReason::Unknown => write!(f, "{} is not a known feature", self.feature),
            FieldErrorReason::Duplicate => write!(f, "{} was given more than once", self.feature),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("invalid input: {}", describe_fields(.fields, .filled))]
    InvalidInput {
        fields: Vec<FieldError>,
        filled: usize,
    },

    #[error(
        "invalid input: expected {expected} feature values, got {actual}",
        expected = DIMENSIONS
    )]
    WrongFeatureCount { actual: usize },

    #[error("invalid model parameters: {reason}")]
    InvalidModel { reason: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to write model config: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("failed to read form csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render chart: {reason}")]
    Plot { reason: String },
}

impl ScoreError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::WrongFeatureCount { .. }
        )
    }

    /// Names of the features that were rejected, in form order.
    pub fn invalid_features(&self) -> Vec<&str> {
        match self {
            Self::InvalidInput { fields, .. } => {
                fields.iter().map(|field| field.feature.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn describe_fields(fields: &[FieldError], filled: &usize) -> String {
    let listed = fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!("{listed} ({filled}/{DIMENSIONS} features filled)")
}
