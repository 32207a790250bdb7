use crate::core::prediction::{SkyCondition, Trend};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "safenergy",
    version,
    about = "Composite safety index for nuclear power plant regions"
)]
pub struct Cli {
    /// Log source fallbacks and storage at info level
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score radiation, air quality and weather into one safety index
    Index(IndexArgs),
    /// Show the latest readings for one plant or all of them
    Readings(ReadingsArgs),
    /// Hourly safety forecast from current readings
    Predict(PredictArgs),
    /// List monitored plants
    Plants(PlantsArgs),
    Init(InitArgs),
}

#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// JSON snapshot of readings, overriding [data].readings_file
    #[arg(long)]
    pub readings: Option<PathBuf>,
    /// Seed for synthetic readings
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct IndexArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Plant name, short name, English name or region
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ReadingsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[arg(long)]
    pub plant: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[arg(long)]
    pub location: Option<String>,
    /// Hours ahead to forecast, one prediction per hour (at most a week)
    #[arg(long, default_value_t = 24, value_parser = clap::value_parser!(u32).range(1..=168))]
    pub hours: u32,
    /// Sky condition; inferred from the weather reading when omitted
    #[arg(long, value_enum)]
    pub sky: Option<SkyCondition>,
    #[arg(long, value_enum, default_value_t = Trend::Steady)]
    pub trend: Trend,
}

#[derive(Debug, Args)]
pub struct PlantsArgs {
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predict_hours(args: &[&str]) -> Result<u32, clap::Error> {
        let cli = Cli::try_parse_from(["safenergy", "predict"].iter().chain(args))?;
        match cli.command {
            Commands::Predict(args) => Ok(args.hours),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn forecast_hours_default_to_a_day() {
        assert_eq!(predict_hours(&[]).unwrap(), 24);
        assert_eq!(predict_hours(&["--hours", "168"]).unwrap(), 168);
    }

    #[test]
    fn forecast_hours_are_capped_at_a_week() {
        assert!(predict_hours(&["--hours", "169"]).is_err());
        assert!(predict_hours(&["--hours", "4000000000"]).is_err());
        assert!(predict_hours(&["--hours", "0"]).is_err());
    }
}
