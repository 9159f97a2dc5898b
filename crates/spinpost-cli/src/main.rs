use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use spinpost_analysis::{run_analysis, write_table_path, AnalysisConfig};
use spinpost_core::Dataset;

#[derive(Parser, Debug)]
#[command(name = "spinpost", about = "Spin-simulation trajectory post-processor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate a simulation dataset into an observable table.
    Analyze(AnalyzeArgs),
    /// Print a default analysis configuration in YAML.
    ConfigTemplate,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Simulation dataset exported as JSON.
    dataset: PathBuf,
    /// Optional YAML analysis configuration (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output table path; defaults to the dataset path with a `.mean` extension.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Optional path for the full analysis report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Analyze(args) => run_analyze(&args),
        Command::ConfigTemplate => print_config_template(),
    }
}

fn run_analyze(args: &AnalyzeArgs) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    let dataset = Dataset::load(&args.dataset)?;
    let report = run_analysis(&dataset, &config)?;

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| args.dataset.with_extension("mean"));
    write_table_path(&out, report.seed, &report.species, &report.rows)?;
    log::info!(
        "wrote {} rows ({} skipped) to {}",
        report.rows.len(),
        report.skipped.len(),
        out.display()
    );

    if let Some(report_path) = &args.report {
        fs::write(report_path, serde_json::to_vec_pretty(&report)?)?;
    }
    Ok(())
}

fn print_config_template() -> Result<(), Box<dyn Error>> {
    let yaml = serde_yaml::to_string(&AnalysisConfig::default())?;
    print!("{yaml}");
    Ok(())
}
