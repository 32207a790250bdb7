pub mod model;
pub mod prediction;
pub mod report;
pub mod score;

use crate::config::Config;
use crate::core::prediction::{Conditions, Prediction, SkyCondition, Trend};
use crate::core::report::{ConfigSummary, FinalReport};
use crate::plants::Target;
use crate::sources::{self, ReadingSource};
use crate::store;
use anyhow::Result;
use chrono::Utc;
use rand::Rng;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct AssessOptions {
    pub save: bool,
}

pub fn run_assessment(
    cfg: &Config,
    sources: &mut [Box<dyn ReadingSource>],
    target: &Target,
    opts: AssessOptions,
    cwd: &Path,
) -> Result<FinalReport> {
    let acquired = sources::acquire(sources, target.plant)?;
    let readings = &acquired.readings;

    let index = score::calculate_safety_index(
        &readings.radiation,
        &readings.weather,
        &readings.air_quality,
        &target.label,
    );
    let penalties =
        score::all_penalties(&readings.radiation, &readings.weather, &readings.air_quality);

    let mut store_cfg = cfg.store.clone();
    store_cfg.enabled &= opts.save;
    let (index, stored) = store::persist(index, &store_cfg, cwd);
    let exit = report::evaluate_exit(&index, cfg);

    Ok(FinalReport {
        index,
        readings: acquired.readings,
        provenance: acquired.provenance,
        penalties,
        stored,
        config: ConfigSummary {
            fail_on: cfg.general.fail_on,
            min_score: cfg.general.min_score,
        },
        exit,
    })
}

#[derive(Debug, Clone, Copy)]
pub struct ForecastOptions {
    pub hours: u32,
    pub sky: Option<SkyCondition>,
    pub trend: Trend,
}

/// Forecasts from the current readings; the air-quality index counts as 0
/// when the station reports none.
pub fn run_forecast<R: Rng>(
    sources: &mut [Box<dyn ReadingSource>],
    target: &Target,
    opts: ForecastOptions,
    rng: &mut R,
) -> Result<Vec<Prediction>> {
    let acquired = sources::acquire(sources, target.plant)?;
    let readings = &acquired.readings;

    let conditions = Conditions {
        radiation_level: readings.radiation.radiation_level,
        air_quality_index: readings
            .air_quality
            .overall_index
            .map_or(0.0, f64::from),
        sky: opts
            .sky
            .unwrap_or_else(|| SkyCondition::from_reading(&readings.weather)),
        trend: opts.trend,
    };

    Ok(prediction::forecast(
        &target.label,
        &conditions,
        opts.hours,
        Utc::now(),
        rng,
    ))
}
