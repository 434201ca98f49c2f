use serde::Serialize;
use std::fmt::Write;

use crate::error::Result;
use crate::features::{feature_index, FEATURES};
use crate::parse::Diagnosis;
use crate::scorer::{Contribution, PredictionResult};

pub const DEFAULT_TOP_CONTRIBUTIONS: usize = 10;

pub fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

fn display_name(feature: &str) -> String {
    feature_index(feature).map_or_else(|| feature.to_string(), |i| FEATURES[i].display_name())
}

pub fn heading(label: Diagnosis) -> &'static str {
    match label {
        Diagnosis::Malignant => "Malignant",
        Diagnosis::Benign => "Benign",
    }
}

pub fn interpretation(label: Diagnosis) -> &'static str {
    match label {
        Diagnosis::Malignant => {
            "The measurements resemble those of malignant tumors in the training data. \
             This is a statistical estimate, not a diagnosis."
        }
        Diagnosis::Benign => {
            "The measurements resemble those of benign tumors in the training data. \
             This is a statistical estimate, not a diagnosis."
        }
    }
}

pub fn next_steps(label: Diagnosis) -> &'static [&'static str] {
    match label {
        Diagnosis::Malignant => &[
            "Consult an oncologist or breast specialist promptly.",
            "Confirm with a biopsy and histopathology.",
            "Discuss further imaging such as MRI or ultrasound.",
        ],
        Diagnosis::Benign => &[
            "Keep up regular screening as advised by a physician.",
            "Report any change in size, shape or texture.",
            "Ask a physician whether follow-up imaging is needed.",
        ],
    }
}

/// Plain-text result card.
pub fn render_text(result: &PredictionResult, top: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", heading(result.label));
    let _ = writeln!(
        out,
        "Probability (Cancer): {}",
        format_percent(result.probability)
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Interpretation:");
    let _ = writeln!(out, "  {}", interpretation(result.label));
    let _ = writeln!(out);
    let _ = writeln!(out, "Next steps:");
    for step in next_steps(result.label) {
        let _ = writeln!(out, "  - {step}");
    }

    let contributions = result.top_contributions(top);
    if !contributions.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Top {} feature contributions:", contributions.len());

        let width = contributions
            .iter()
            .map(|c| display_name(c.feature).len())
            .max()
            .unwrap_or(0);

        for contribution in contributions {
            let _ = writeln!(
                out,
                "  {:<width$}  {:>+8.3}  -> {}",
                display_name(contribution.feature),
                contribution.value,
                contribution.toward.map_or("neutral", Diagnosis::as_str),
            );
        }
    }

    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    label: Diagnosis,
    probability: f64,
    probability_percent: String,
    score: f64,
    interpretation: &'static str,
    next_steps: &'static [&'static str],
    contributions: &'a [Contribution],
}

pub fn render_json(result: &PredictionResult, top: usize) -> Result<String> {
    let report = JsonReport {
        label: result.label,
        probability: result.probability,
        probability_percent: format_percent(result.probability),
        score: result.score,
        interpretation: interpretation(result.label),
        next_steps: next_steps(result.label),
        contributions: result.top_contributions(top),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

/// The feature catalogue grouped by section.
pub fn render_features() -> String {
    let mut out = String::new();

    for section in crate::features::Section::ALL {
        let _ = writeln!(out, "{} - {}", section.title(), section.description());
        for feature in section.features() {
            let _ = writeln!(out, "  {:<24} {}", feature.key, feature.description);
        }
    }

    out
}
