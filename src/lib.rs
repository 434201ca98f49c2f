pub mod cli;
pub mod error;
pub mod features;
pub mod logging;
pub mod model;
pub mod parse;
pub mod plot;
pub mod report;
pub mod scorer;

pub use error::{Result, ScoreError};
pub use model::ModelParameters;
pub use parse::{Diagnosis, Features, DIMENSIONS};
pub use scorer::{sigmoid, Contribution, PredictionResult, Scorer};
