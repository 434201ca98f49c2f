use clap::Parser;
use linear_diagnosis::{
    cli::{Cli, Command, OutputArgs, OutputFormat, PredictArgs},
    features,
    logging::init_tracing,
    parse::{features_from_fields, read_form_csv, read_form_json},
    plot::draw_contributions,
    report::{render_features, render_json, render_text},
    Features, ModelParameters, Scorer,
};

fn read_form(args: &PredictArgs) -> linear_diagnosis::Result<Features> {
    if let Some(path) = &args.csv {
        read_form_csv(path)
    } else if let Some(path) = &args.json {
        read_form_json(path)
    } else {
        features_from_fields(args.fields.iter().map(|(name, value)| (name, value)))
    }
}

fn report(
    scorer: &Scorer,
    features: &Features,
    output: &OutputArgs,
) -> linear_diagnosis::Result<()> {
    let result = scorer.evaluate(features);

    match output.format {
        OutputFormat::Text => print!("{}", render_text(&result, output.top)),
        OutputFormat::Json => println!("{}", render_json(&result, output.top)?),
    }

    if let Some(path) = &output.chart {
        draw_contributions(path, result.top_contributions(output.top))?;
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let parameters = ModelParameters::load_or_default(cli.model.as_deref())?;
    let scorer = Scorer::new(parameters);

    match &cli.command {
        Command::Predict(args) => {
            let features = read_form(args)?;
            report(&scorer, &features, &args.output)?;
        }
        Command::Sample(args) => {
            let features = features::sample(args.kind.into());
            report(&scorer, features, &args.output)?;
        }
        Command::Features => print!("{}", render_features()),
        Command::Model => print!("{}", scorer.parameters().to_toml_string()?),
    }

    Ok(())
}
