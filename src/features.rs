use serde::Serialize;

use crate::parse::{Diagnosis, Features, DIMENSIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Mean,
    StandardError,
    Worst,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Mean, Section::StandardError, Section::Worst];

    pub fn title(self) -> &'static str {
        match self {
            Section::Mean => "Mean",
            Section::StandardError => "Standard Error",
            Section::Worst => "Worst",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Section::Mean => "Average of each measurement over all nuclei in the image",
            Section::StandardError => "Standard error of each measurement over all nuclei",
            Section::Worst => "Mean of the three largest values of each measurement",
        }
    }

    pub fn features(self) -> &'static [Feature] {
        let start = match self {
            Section::Mean => 0,
            Section::StandardError => 10,
            Section::Worst => 20,
        };
        &FEATURES[start..start + 10]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub key: &'static str,
    pub label: &'static str,
    pub section: Section,
    pub description: &'static str,
}

impl Feature {
    const fn new(
        key: &'static str,
        label: &'static str,
        section: Section,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            label,
            section,
            description,
        }
    }

    /// Label qualified by its section, e.g. "Worst Radius" or "Radius SE".
    pub fn display_name(&self) -> String {
        match self.section {
            Section::Mean => format!("Mean {}", self.label),
            Section::StandardError => format!("{} SE", self.label),
            Section::Worst => format!("Worst {}", self.label),
        }
    }
}

use self::Section::{Mean, StandardError, Worst};

/// Model input order. Means, std-devs and weights are indexed the same way.
pub static FEATURES: [Feature; DIMENSIONS] = [
    Feature::new("mean_radius", "Radius", Mean, "Average distance from center to boundary"),
    Feature::new("mean_texture", "Texture", Mean, "Std deviation of gray-scale values"),
    Feature::new("mean_perimeter", "Perimeter", Mean, "Mean perimeter of the nucleus"),
    Feature::new("mean_area", "Area", Mean, "Mean area of the nucleus"),
    Feature::new("mean_smoothness", "Smoothness", Mean, "Local variation in radius lengths"),
    Feature::new("mean_compactness", "Compactness", Mean, "Perimeter^2 / Area - 1"),
    Feature::new("mean_concavity", "Concavity", Mean, "Severity of concave contour portions"),
    Feature::new("mean_concave_points", "Concave Pts", Mean, "Number of concave contour portions"),
    Feature::new("mean_symmetry", "Symmetry", Mean, "Symmetry of the nucleus shape"),
    Feature::new("mean_fractal_dimension", "Fractal Dim", Mean, "Boundary complexity (coastline approx.)"),
    Feature::new("radius_error", "Radius", StandardError, "Standard error of radius"),
    Feature::new("texture_error", "Texture", StandardError, "Standard error of texture"),
    Feature::new("perimeter_error", "Perimeter", StandardError, "Standard error of perimeter"),
    Feature::new("area_error", "Area", StandardError, "Standard error of area"),
    Feature::new("smoothness_error", "Smoothness", StandardError, "Standard error of smoothness"),
    Feature::new("compactness_error", "Compactness", StandardError, "Standard error of compactness"),
    Feature::new("concavity_error", "Concavity", StandardError, "Standard error of concavity"),
    Feature::new("concave_points_error", "Concave Pts", StandardError, "Standard error of concave points"),
    Feature::new("symmetry_error", "Symmetry", StandardError, "Standard error of symmetry"),
    Feature::new("fractal_dimension_error", "Fractal Dim", StandardError, "Standard error of fractal dimension"),
    Feature::new("worst_radius", "Radius", Worst, "Largest radius (mean of 3 largest)"),
    Feature::new("worst_texture", "Texture", Worst, "Largest texture value"),
    Feature::new("worst_perimeter", "Perimeter", Worst, "Largest perimeter value"),
    Feature::new("worst_area", "Area", Worst, "Largest area value"),
    Feature::new("worst_smoothness", "Smoothness", Worst, "Largest smoothness value"),
    Feature::new("worst_compactness", "Compactness", Worst, "Largest compactness value"),
    Feature::new("worst_concavity", "Concavity", Worst, "Largest concavity value"),
    Feature::new("worst_concave_points", "Concave Pts", Worst, "Largest concave points value"),
    Feature::new("worst_symmetry", "Symmetry", Worst, "Largest symmetry value"),
    Feature::new("worst_fractal_dimension", "Fractal Dim", Worst, "Largest fractal dimension value"),
];

pub fn feature_index(key: &str) -> Option<usize> {
    FEATURES.iter().position(|feature| feature.key == key)
}

pub fn feature_names() -> impl Iterator<Item = &'static str> {
    FEATURES.iter().map(|feature| feature.key)
}

// Records taken from the Wisconsin Diagnostic Breast Cancer dataset.
pub const SAMPLE_BENIGN: Features = [
    12.25, 17.94, 78.27, 462.0, 0.0869, 0.0678, 0.029, 0.0149, 0.172, 0.0596, 0.236, 0.866, 1.68,
    19.54, 0.0054, 0.0137, 0.0186, 0.0072, 0.0163, 0.0025, 13.5, 22.46, 86.92, 562.1, 0.119,
    0.142, 0.093, 0.044, 0.247, 0.071,
];

pub const SAMPLE_MALIGNANT: Features = [
    19.81, 22.15, 130.0, 1260.0, 0.0984, 0.159, 0.1974, 0.1049, 0.19, 0.061, 0.746, 1.153, 5.439,
    94.44, 0.0061, 0.0349, 0.056, 0.0179, 0.0225, 0.0043, 25.67, 29.33, 170.1, 2027.0, 0.145,
    0.4504, 0.5187, 0.2154, 0.369, 0.1048,
];

pub fn sample(diagnosis: Diagnosis) -> &'static Features {
    match diagnosis {
        Diagnosis::Benign => &SAMPLE_BENIGN,
        Diagnosis::Malignant => &SAMPLE_MALIGNANT,
    }
}
