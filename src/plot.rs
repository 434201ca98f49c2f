use plotters::prelude::*;
use std::path::Path;

use crate::error::{Result, ScoreError};
use crate::features::{feature_index, FEATURES};
use crate::parse::Diagnosis;
use crate::scorer::Contribution;

const MALIGNANT_COLOR: RGBColor = RGBColor(0xdc, 0x26, 0x26);
const BENIGN_COLOR: RGBColor = RGBColor(0x05, 0x96, 0x69);
const NEUTRAL_COLOR: RGBColor = RGBColor(0x9c, 0xa3, 0xaf);

fn plot_error(error: impl std::fmt::Display) -> ScoreError {
    ScoreError::Plot {
        reason: error.to_string(),
    }
}

/// Horizontal bar chart of feature contributions, largest on top.
pub fn draw_contributions(path: &Path, contributions: &[Contribution]) -> Result<()> {
    if contributions.is_empty() {
        return Err(ScoreError::Plot {
            reason: "no contributions to draw".to_string(),
        });
    }

    let names: Vec<String> = contributions
        .iter()
        .rev()
        .map(|c| {
            feature_index(c.feature)
                .map_or_else(|| c.feature.to_string(), |i| FEATURES[i].display_name())
        })
        .collect();
    let limit = contributions
        .iter()
        .map(|c| c.value.abs())
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON)
        * 1.1;
    let rows = contributions.len();
    #[allow(clippy::cast_possible_truncation)]
    let height = 120 + 32 * rows as u32;

    let root = SVGBackend::new(path, (800, height)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Feature contributions", ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(180)
        .build_cartesian_2d(-limit..limit, 0..rows)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(rows)
        .y_label_formatter(&|row| names.get(*row).cloned().unwrap_or_default())
        .x_desc("<- benign | malignant ->")
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(contributions.iter().rev().enumerate().map(|(row, c)| {
            // Bars always extend toward the class they push to.
            let (color, extent) = match c.toward {
                Some(Diagnosis::Malignant) => (MALIGNANT_COLOR, c.value.abs()),
                Some(Diagnosis::Benign) => (BENIGN_COLOR, -c.value.abs()),
                None => (NEUTRAL_COLOR, 0.0),
            };
            Rectangle::new([(0.0, row), (extent, row + 1)], color.filled())
        }))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    tracing::info!(path = %path.display(), rows, "wrote contribution chart");

    Ok(())
}
