mod cli;
mod config;
mod core;
mod plants;
mod sources;
mod store;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, IndexArgs, PredictArgs, ReadingsArgs, SourceArgs};
use config::Config;
use core::report::{JsonForecast, JsonReadings, JsonReport};
use core::{AssessOptions, ForecastOptions};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sources::ReadingSource;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Index(args) => run_index(args),
        Commands::Readings(args) => run_readings(args),
        Commands::Predict(args) => run_predict(args),
        Commands::Plants(args) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&plants::PLANTS)?);
            } else {
                core::report::print_plants(&plants::PLANTS);
            }
            Ok(0)
        }
        Commands::Init(args) => {
            if args.config.is_some() {
                tracing::warn!("--config is ignored by `safenergy init`; writing ./safenergy.toml");
            }

            let path = std::env::current_dir()?.join(config::CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
    }
}

struct Prepared {
    cwd: PathBuf,
    config: Config,
    sources: Vec<Box<dyn ReadingSource>>,
}

fn prepare(args: &SourceArgs) -> Result<Prepared> {
    let cwd = std::env::current_dir()?;
    let mut config = config::load_config(args.config.as_deref(), &cwd)?.config;

    if let Some(seed) = args.seed {
        config.data.seed = Some(seed);
    }
    config.general.json |= args.json;

    let sources = sources::build_sources(&config.data, args.readings.as_deref(), &cwd)?;
    Ok(Prepared {
        cwd,
        config,
        sources,
    })
}

fn run_index(args: IndexArgs) -> Result<i32> {
    let mut prepared = prepare(&args.source)?;
    let cfg = &prepared.config;
    let location = args.location.as_deref().or(cfg.general.location.as_deref());
    let target = plants::resolve_target(location)?;

    let report = core::run_assessment(
        cfg,
        &mut prepared.sources,
        &target,
        AssessOptions {
            save: !args.no_save,
        },
        &prepared.cwd,
    )?;

    if cfg.general.json {
        let json_report = JsonReport::from(&report);
        println!("{}", serde_json::to_string_pretty(&json_report)?);
    } else {
        core::report::print_human(&report);
    }

    if report.exit.ok { Ok(0) } else { Ok(1) }
}

fn run_readings(args: ReadingsArgs) -> Result<i32> {
    let mut prepared = prepare(&args.source)?;
    let selected: Vec<&plants::Plant> = match args.plant.as_deref() {
        Some(query) => vec![plants::resolve_target(Some(query))?.plant],
        None => plants::PLANTS.iter().collect(),
    };

    let mut collected = Vec::new();
    for plant in selected {
        let acquired = sources::acquire(&mut prepared.sources, plant)?;
        let tourism = sources::acquire_tourism(&mut prepared.sources, plant);
        collected.push((plant, acquired, tourism));
    }

    if prepared.config.general.json {
        let json: Vec<JsonReadings> = collected
            .iter()
            .map(|(plant, acquired, tourism)| {
                JsonReadings::new(plant, acquired, tourism.as_ref())
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        for (plant, acquired, tourism) in &collected {
            core::report::print_readings(plant, acquired, tourism.as_ref());
        }
    }

    Ok(0)
}

fn run_predict(args: PredictArgs) -> Result<i32> {
    let mut prepared = prepare(&args.source)?;
    let cfg = &prepared.config;
    let location = args.location.as_deref().or(cfg.general.location.as_deref());
    let target = plants::resolve_target(location)?;
    let mut rng = match cfg.data.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let predictions = core::run_forecast(
        &mut prepared.sources,
        &target,
        ForecastOptions {
            hours: args.hours,
            sky: args.sky,
            trend: args.trend,
        },
        &mut rng,
    )?;

    if cfg.general.json {
        let json = JsonForecast {
            location: &target.label,
            prediction_count: predictions.len(),
            predictions: &predictions,
            generated_at: chrono::Utc::now(),
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        core::report::print_forecast(&predictions);
    }

    Ok(0)
}
