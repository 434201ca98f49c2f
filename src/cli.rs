use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::parse::{parse_field_arg, Diagnosis};
use crate::report::DEFAULT_TOP_CONTRIBUTIONS;

/// Breast tumor diagnosis from 30 cell-nucleus measurements
#[derive(Parser, Debug)]
#[command(name = "linear_diagnosis", version)]
pub struct Cli {
    /// Model parameters TOML file; the embedded Wisconsin model is used otherwise
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Debug logging (overridden by DIAGNOSIS_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score a filled-in form
    Predict(PredictArgs),
    /// Score one of the bundled dataset records
    Sample(SampleArgs),
    /// List the expected features
    Features,
    /// Print the model parameters as TOML
    Model,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Feature value as NAME=VALUE; repeat for each feature
    #[arg(short, long = "field", value_name = "NAME=VALUE", value_parser = parse_field_arg)]
    pub fields: Vec<(String, String)>,

    /// Two-column CSV form (feature,value)
    #[arg(long, conflicts_with_all = ["json", "fields"])]
    pub csv: Option<PathBuf>,

    /// JSON object form ({"mean_radius": 14.2, ...})
    #[arg(long, conflicts_with_all = ["csv", "fields"])]
    pub json: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct SampleArgs {
    #[arg(value_enum)]
    pub kind: SampleKind,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Number of feature contributions to report
    #[arg(long, default_value_t = DEFAULT_TOP_CONTRIBUTIONS)]
    pub top: usize,

    /// Write a contribution bar chart (SVG) to this path
    #[arg(long)]
    pub chart: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleKind {
    Benign,
    Malignant,
}

impl From<SampleKind> for Diagnosis {
    fn from(kind: SampleKind) -> Self {
        match kind {
            SampleKind::Benign => Diagnosis::Benign,
            SampleKind::Malignant => Diagnosis::Malignant,
        }
    }
}
