use ndarray::{ArrayView1, ArrayViewMut1};
use serde::Serialize;

use crate::error::Result;
use crate::features::FEATURES;
use crate::model::ModelParameters;
use crate::parse::{features_from_fields, features_from_slice, Diagnosis, Features};

pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// One feature's term in the linear score. `toward` is `None` for a term
/// of exactly zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub feature: &'static str,
    pub value: f64,
    pub toward: Option<Diagnosis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Probability of malignancy.
    pub probability: f64,
    pub label: Diagnosis,
    pub score: f64,
    /// Every feature's contribution, largest magnitude first.
    pub contributions: Vec<Contribution>,
}

impl PredictionResult {
    pub fn top_contributions(&self, count: usize) -> &[Contribution] {
        &self.contributions[..count.min(self.contributions.len())]
    }
}

/// Standardized logistic-regression scorer over the 30 tumor features.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    parameters: ModelParameters,
}

impl Scorer {
    pub fn new(parameters: ModelParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &ModelParameters {
        &self.parameters
    }

    pub fn standardize(&self, features: &Features) -> Features {
        let mut scaled = *features;

        let mut view = ArrayViewMut1::from(&mut scaled);
        view.zip_mut_with(&ArrayView1::from(&self.parameters.means), |value, &mean| {
            *value -= mean;
        });
        view.zip_mut_with(
            &ArrayView1::from(&self.parameters.std_devs),
            |value, &std_dev| *value /= std_dev,
        );

        scaled
    }

    /// Fails fast when `values` is not exactly one value per feature.
    pub fn standardize_slice(&self, values: &[f64]) -> Result<Features> {
        Ok(self.standardize(&features_from_slice(values)?))
    }

    pub fn destandardize(&self, scaled: &Features) -> Features {
        let mut features = *scaled;

        let mut view = ArrayViewMut1::from(&mut features);
        view.zip_mut_with(
            &ArrayView1::from(&self.parameters.std_devs),
            |value, &std_dev| *value *= std_dev,
        );
        view.zip_mut_with(&ArrayView1::from(&self.parameters.means), |value, &mean| {
            *value += mean;
        });

        features
    }

    pub fn score(&self, scaled: &Features) -> f64 {
        ArrayView1::from(scaled).dot(&ArrayView1::from(&self.parameters.weights))
            + self.parameters.bias
    }

    /// Raw model output: the probability of the configured positive class.
    /// Use [`Scorer::evaluate`] for the probability of malignancy.
    pub fn predict(&self, features: &Features) -> f64 {
        let z = self.score(&self.standardize(features));
        let probability = sigmoid(z);

        tracing::debug!(z, probability, "scored feature vector");
        probability
    }

    pub fn predict_slice(&self, values: &[f64]) -> Result<f64> {
        Ok(self.predict(&features_from_slice(values)?))
    }

    /// Probability of malignancy for a raw model output.
    pub fn malignancy(&self, probability: f64) -> f64 {
        match self.parameters.positive_class {
            Diagnosis::Malignant => probability,
            Diagnosis::Benign => 1.0 - probability,
        }
    }

    /// Malignant when the malignancy reaches the threshold; the boundary is
    /// inclusive.
    pub fn classify(&self, malignancy: f64) -> Diagnosis {
        if malignancy >= self.parameters.threshold {
            Diagnosis::Malignant
        } else {
            Diagnosis::Benign
        }
    }

    pub fn contributions(&self, features: &Features) -> Vec<Contribution> {
        let scaled = self.standardize(features);
        let positive_class = self.parameters.positive_class;

        let mut contributions: Vec<_> = scaled
            .iter()
            .zip(self.parameters.weights.iter())
            .zip(FEATURES.iter())
            .map(|((scaled, weight), feature)| {
                let value = scaled * weight;
                let toward = if value > 0.0 {
                    Some(positive_class)
                } else if value < 0.0 {
                    Some(positive_class.opposite())
                } else {
                    None
                };

                Contribution {
                    feature: feature.key,
                    value,
                    toward,
                }
            })
            .collect();

        contributions.sort_by(|a, b| b.value.abs().total_cmp(&a.value.abs()));
        contributions
    }

    pub fn evaluate(&self, features: &Features) -> PredictionResult {
        let score = self.score(&self.standardize(features));
        let probability = self.malignancy(sigmoid(score));
        let label = self.classify(probability);

        tracing::debug!(score, probability, %label, "evaluated feature vector");

        PredictionResult {
            probability,
            label,
            score,
            contributions: self.contributions(features),
        }
    }

    /// Validates named form values and evaluates them.
    pub fn predict_named<I, K, V>(&self, fields: I) -> Result<PredictionResult>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let features = features_from_fields(fields)?;
        Ok(self.evaluate(&features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{SAMPLE_BENIGN, SAMPLE_MALIGNANT};
    use crate::parse::DIMENSIONS;

    fn scorer_with(parameters: ModelParameters) -> Scorer {
        Scorer::new(parameters)
    }

    #[test]
    fn sigmoid_at_zero_is_one_half() {
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn sigmoid_saturates_without_nan() {
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
        assert!(sigmoid(-30.0) > 0.0);
        assert!(sigmoid(30.0) < 1.0);
    }

    #[test]
    fn means_standardize_to_zero() {
        let scorer = Scorer::default();
        let scaled = scorer.standardize(&scorer.parameters().means);
        assert!(scaled.iter().all(|value| *value == 0.0));
        assert_eq!(scorer.score(&scaled), scorer.parameters().bias);
    }

    #[test]
    fn standardize_uses_per_feature_statistics() {
        let mut parameters = ModelParameters::default();
        parameters.means = [1.0; DIMENSIONS];
        parameters.std_devs = [2.0; DIMENSIONS];
        let scorer = scorer_with(parameters);

        let scaled = scorer.standardize(&[5.0; DIMENSIONS]);
        assert_eq!(scaled, [2.0; DIMENSIONS]);
        assert_eq!(scorer.destandardize(&scaled), [5.0; DIMENSIONS]);
    }

    #[test]
    fn score_is_weighted_sum_plus_bias() {
        let mut parameters = ModelParameters::default();
        parameters.weights = [0.0; DIMENSIONS];
        parameters.weights[0] = 2.0;
        parameters.weights[29] = -1.0;
        parameters.bias = 0.25;
        let scorer = scorer_with(parameters);

        let mut scaled = [0.0; DIMENSIONS];
        scaled[0] = 1.5;
        scaled[29] = 4.0;
        assert_eq!(scorer.score(&scaled), 2.0 * 1.5 - 4.0 + 0.25);
    }

    #[test]
    fn wrong_length_fails_fast() {
        let scorer = Scorer::default();
        assert!(scorer.standardize_slice(&[1.0; 29]).unwrap_err().is_invalid_input());
        assert!(scorer.predict_slice(&[1.0; 31]).unwrap_err().is_invalid_input());
        assert!(scorer.predict_slice(&SAMPLE_BENIGN).is_ok());
    }

    #[test]
    fn threshold_is_inclusive() {
        let scorer = Scorer::default();
        assert_eq!(scorer.classify(0.5), Diagnosis::Malignant);
        assert_eq!(scorer.classify(0.499_999_999), Diagnosis::Benign);
    }

    #[test]
    fn configured_threshold_moves_boundary() {
        let mut parameters = ModelParameters::default();
        parameters.threshold = 0.7;
        let scorer = scorer_with(parameters);

        let result = scorer.evaluate(&scorer.parameters().means);
        assert!((result.probability - 0.6365).abs() < 1e-4);
        assert_eq!(result.label, Diagnosis::Benign);
    }

    #[test]
    fn contributions_sum_to_score() {
        let scorer = Scorer::default();
        let result = scorer.evaluate(&SAMPLE_MALIGNANT);

        let total: f64 = result.contributions.iter().map(|c| c.value).sum();
        assert!((total + scorer.parameters().bias - result.score).abs() < 1e-9);
        assert_eq!(result.contributions.len(), DIMENSIONS);

        for pair in result.contributions.windows(2) {
            assert!(pair[0].value.abs() >= pair[1].value.abs());
        }
    }

    #[test]
    fn contribution_direction_follows_positive_class() {
        let scorer = Scorer::default();
        for contribution in scorer.contributions(&SAMPLE_MALIGNANT) {
            let expected = if contribution.value > 0.0 {
                Diagnosis::Malignant
            } else {
                Diagnosis::Benign
            };
            assert_eq!(contribution.toward, Some(expected));
        }

        let mut parameters = ModelParameters::default();
        parameters.positive_class = Diagnosis::Benign;
        let scorer = scorer_with(parameters);
        for contribution in scorer.contributions(&SAMPLE_MALIGNANT) {
            let expected = if contribution.value > 0.0 {
                Diagnosis::Benign
            } else {
                Diagnosis::Malignant
            };
            assert_eq!(contribution.toward, Some(expected));
        }
    }

    #[test]
    fn zero_contributions_are_neutral() {
        let scorer = Scorer::default();
        let mut features = scorer.parameters().means;
        features[0] += scorer.parameters().std_devs[0];

        let contributions = scorer.contributions(&features);
        assert_eq!(contributions[0].feature, "mean_radius");
        assert_eq!(contributions[0].toward, Some(Diagnosis::Benign));
        assert!(contributions[1..].iter().all(|c| c.toward.is_none()));
    }

    #[test]
    fn predict_is_raw_output_under_benign_orientation() {
        let mut parameters = ModelParameters::default();
        parameters.positive_class = Diagnosis::Benign;
        let scorer = scorer_with(parameters);

        let raw = scorer.predict(&SAMPLE_BENIGN);
        let result = scorer.evaluate(&SAMPLE_BENIGN);
        assert!(raw > 0.99);
        assert_eq!(result.probability, 1.0 - raw);
        assert_eq!(scorer.malignancy(raw), result.probability);
    }

    #[test]
    fn benign_orientation_reads_output_as_benign_probability() {
        let mut parameters = ModelParameters::default();
        parameters.positive_class = Diagnosis::Benign;
        let scorer = scorer_with(parameters);

        let malignant = scorer.evaluate(&SAMPLE_MALIGNANT);
        assert_eq!(malignant.label, Diagnosis::Malignant);
        assert!(malignant.probability > 0.99);

        let benign = scorer.evaluate(&SAMPLE_BENIGN);
        assert_eq!(benign.label, Diagnosis::Benign);
        assert!(benign.probability < 0.01);
    }

    #[test]
    fn top_contributions_clamps_count() {
        let result = Scorer::default().evaluate(&SAMPLE_BENIGN);
        assert_eq!(result.top_contributions(10).len(), 10);
        assert_eq!(result.top_contributions(100).len(), DIMENSIONS);
        assert_eq!(result.top_contributions(3), &result.contributions[..3]);
    }
}
