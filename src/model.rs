use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, ScoreError};
use crate::parse::{Diagnosis, Features, DIMENSIONS};

pub const DEFAULT_THRESHOLD: f64 = 0.5;

// Trained on the Wisconsin Diagnostic Breast Cancer dataset (569 samples).
const WEIGHTS: Features = [
    -0.538_969_973_174_398_5,
    -0.643_433_061_789_621_1,
    -0.517_458_201_567_262_2,
    -0.577_091_872_910_502_6,
    -0.200_883_729_372_409_8,
    0.178_941_651_192_758_7,
    -0.633_046_023_170_518_3,
    -0.781_109_957_194_060_2,
    0.030_956_916_449_250_783,
    0.299_416_910_853_774_64,
    -0.898_022_225_485_367_3,
    0.058_513_703_063_635_7,
    -0.616_329_547_488_241_9,
    -0.695_374_606_569_965_6,
    -0.178_612_372_660_707_26,
    0.596_624_442_514_178_5,
    0.074_641_626_838_085_73,
    -0.134_971_169_612_718_1,
    0.307_066_554_553_248_3,
    0.531_193_221_745_955_2,
    -0.819_269_725_909_636_5,
    -1.028_929_333_967_863_8,
    -0.706_930_694_066_497_8,
    -0.794_158_058_941_377_9,
    -0.692_780_998_419_628_4,
    -0.133_249_535_926_359_32,
    -0.721_496_993_848_492_3,
    -0.754_013_981_769_855_6,
    -0.848_201_799_683_881_3,
    -0.135_188_838_251_086_46,
];

const BIAS: f64 = 0.560_271_036_357_066_9;

const MEANS: Features = [
    14.117_635_164_835_171,
    19.185_032_967_032_98,
    91.882_241_758_241_85,
    654.377_582_417_582_5,
    0.095_744_021_978_022_04,
    0.103_619_318_681_318_63,
    0.088_898_145_054_944_98,
    0.048_279_870_329_670_31,
    0.181_098_681_318_681_48,
    0.062_756_769_230_769_25,
    0.402_015_824_175_823_93,
    1.202_686_813_186_813_6,
    2.858_253_406_593_405,
    40.071_298_901_098_9,
    0.006_989_074_725_274_73,
    0.025_635_448_351_648_396,
    0.032_823_672_307_692_3,
    0.011_893_940_659_340_657,
    0.020_573_512_087_912_114,
    0.003_820_455_604_395_603,
    16.235_103_296_703_29,
    25.535_692_307_692_308,
    107.103_120_879_120_91,
    876.987_032_967_034_1,
    0.131_532_131_868_131_84,
    0.252_741_802_197_802_3,
    0.274_594_569_230_769_36,
    0.114_182_221_978_021_97,
    0.290_502_197_802_197_77,
    0.083_867_846_153_846_2,
];

const STD_DEVS: Features = [
    3.531_927_609_128_768_4,
    4.261_314_035_201_523,
    24.295_284_465_966_07,
    354.552_925_206_064_8,
    0.013_907_698_124_434_402,
    0.052_412_805_496_132_024,
    0.079_380_509_084_117_63,
    0.038_018_354_057_687_886,
    0.027_457_084_964_442_154,
    0.007_201_785_058_141_391_5,
    0.282_849_557_519_816_2,
    0.541_151_675_881_748_1,
    2.068_931_392_290_445,
    47.184_382_009_149_84,
    0.003_053_473_706_769_491,
    0.018_586_296_957_914_24,
    0.032_110_245_434_099_904,
    0.006_287_187_209_688_091,
    0.008_162_966_415_892_984,
    0.002_784_068_741_858_158_5,
    4.805_977_154_451_531,
    6.058_439_641_882_756,
    33.337_968_637_838_08,
    567.048_681_115_592_4,
    0.023_057_125_695_655_31,
    0.154_843_847_371_602_06,
    0.209_167_861_376_778_73,
    0.065_254_258_281_471_59,
    0.063_081_795_806_735_15,
    0.017_828_276_003_334_045,
];

/// Trained constants the scorer is built from.
///
/// `positive_class` is the class the sigmoid output is the probability of.
///
/// `threshold` is the decision rule, fixed at [`DEFAULT_THRESHOLD`] for the
/// embedded model. A model file may set another value; any other threshold
/// departs from the standard "malignant at 0.5 or above" rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParameters {
    pub means: Features,
    pub std_devs: Features,
    pub weights: Features,
    pub bias: f64,
    pub threshold: f64,
    pub positive_class: Diagnosis,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            means: MEANS,
            std_devs: STD_DEVS,
            weights: WEIGHTS,
            bias: BIAS,
            threshold: DEFAULT_THRESHOLD,
            positive_class: Diagnosis::Malignant,
        }
    }
}

/// On-disk form of [`ModelParameters`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    pub means: Vec<f64>,
    pub std_devs: Vec<f64>,
    pub weights: Vec<f64>,
    pub bias: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_positive_class")]
    pub positive_class: Diagnosis,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_positive_class() -> Diagnosis {
    Diagnosis::Malignant
}

impl From<&ModelParameters> for ModelConfig {
    fn from(parameters: &ModelParameters) -> Self {
        Self {
            means: parameters.means.to_vec(),
            std_devs: parameters.std_devs.to_vec(),
            weights: parameters.weights.to_vec(),
            bias: parameters.bias,
            threshold: parameters.threshold,
            positive_class: parameters.positive_class,
        }
    }
}

fn to_features(name: &str, values: &[f64]) -> Result<Features> {
    let features: Features = values.try_into().map_err(|_| ScoreError::InvalidModel {
        reason: format!("{name} has {} entries, expected {DIMENSIONS}", values.len()),
    })?;

    if let Some(index) = features.iter().position(|value| !value.is_finite()) {
        return Err(ScoreError::InvalidModel {
            reason: format!("{name}[{index}] is not finite"),
        });
    }

    Ok(features)
}

impl TryFrom<ModelConfig> for ModelParameters {
    type Error = ScoreError;

    fn try_from(config: ModelConfig) -> Result<Self> {
        let means = to_features("means", &config.means)?;
        let std_devs = to_features("std_devs", &config.std_devs)?;
        let weights = to_features("weights", &config.weights)?;

        if let Some(index) = std_devs.iter().position(|std_dev| *std_dev == 0.0) {
            return Err(ScoreError::InvalidModel {
                reason: format!("std_devs[{index}] is zero"),
            });
        }

        if !config.bias.is_finite() {
            return Err(ScoreError::InvalidModel {
                reason: "bias is not finite".to_string(),
            });
        }

        if !(config.threshold > 0.0 && config.threshold < 1.0) {
            return Err(ScoreError::InvalidModel {
                reason: format!("threshold {} is outside (0, 1)", config.threshold),
            });
        }

        Ok(Self {
            means,
            std_devs,
            weights,
            bias: config.bias,
            threshold: config.threshold,
            positive_class: config.positive_class,
        })
    }
}

impl ModelParameters {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ModelConfig = toml::from_str(source)?;
        Self::try_from(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| ScoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let parameters = Self::from_toml_str(&source)?;
        if (parameters.threshold - DEFAULT_THRESHOLD).abs() > f64::EPSILON {
            tracing::warn!(
                threshold = parameters.threshold,
                default = DEFAULT_THRESHOLD,
                "model file overrides the decision threshold"
            );
        }
        tracing::info!(
            path = %path.display(),
            threshold = parameters.threshold,
            positive_class = %parameters.positive_class,
            "loaded model parameters"
        );

        Ok(parameters)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("using embedded model parameters");
                Ok(Self::default())
            }
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(&ModelConfig::from(self))?)
    }
}
