use crate::config::DataConfig;
use crate::core::model::{AirQualityReading, RadiationReading, TourismReading, WeatherReading};
use crate::plants::Plant;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

pub mod snapshot;
pub mod synthetic;

pub trait ReadingSource {
    fn name(&self) -> &'static str;
    fn radiation(&mut self, plant: &Plant) -> Result<Option<RadiationReading>>;
    fn weather(&mut self, plant: &Plant) -> Result<Option<WeatherReading>>;
    fn air_quality(&mut self, plant: &Plant) -> Result<Option<AirQualityReading>>;

    fn tourism(&mut self, _plant: &Plant) -> Result<Option<TourismReading>> {
        Ok(None)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Readings {
    pub radiation: RadiationReading,
    pub weather: WeatherReading,
    pub air_quality: AirQualityReading,
}

/// Which source supplied each reading.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub radiation: &'static str,
    pub weather: &'static str,
    pub air_quality: &'static str,
}

#[derive(Debug, Clone)]
pub struct Acquired {
    pub readings: Readings,
    pub provenance: Provenance,
}

/// Builds the ordered fallback chain: the snapshot file first when one is
/// configured, then synthetic readings when allowed.
///
/// `explicit_file` comes from the command line and replaces
/// `[data].readings_file`. Unlike the configured file it must load.
pub fn build_sources(
    cfg: &DataConfig,
    explicit_file: Option<&Path>,
    cwd: &Path,
) -> Result<Vec<Box<dyn ReadingSource>>> {
    let mut sources: Vec<Box<dyn ReadingSource>> = Vec::new();

    if let Some(file) = explicit_file {
        let path = crate::utils::fs::resolve_path(cwd, file);
        let source = snapshot::SnapshotSource::load(&path)
            .context("readings file given with --readings could not be loaded")?;
        sources.push(Box::new(source));
    } else if let Some(file) = &cfg.readings_file {
        let path = crate::utils::fs::resolve_path(cwd, file);
        match snapshot::SnapshotSource::load(&path) {
            Ok(source) => sources.push(Box::new(source)),
            Err(err) if cfg.fallback_synthetic => {
                warn!(
                    path = %path.display(),
                    error = %format!("{err:#}"),
                    "readings file unavailable, falling back to synthetic readings"
                );
            }
            Err(err) => return Err(err),
        }
    }

    if cfg.fallback_synthetic {
        sources.push(Box::new(synthetic::SyntheticSource::new(cfg.seed)));
    }

    if sources.is_empty() {
        bail!(
            "no reading source configured (set [data].readings_file or enable fallback_synthetic)"
        );
    }

    Ok(sources)
}

fn first_available<T>(
    sources: &mut [Box<dyn ReadingSource>],
    kind: &str,
    plant: &Plant,
    mut fetch: impl FnMut(&mut dyn ReadingSource) -> Result<Option<T>>,
) -> Result<(T, &'static str)> {
    for source in sources.iter_mut() {
        let name = source.name();
        match fetch(source.as_mut()) {
            Ok(Some(reading)) => {
                info!(source = name, kind, plant = plant.name, "reading acquired");
                return Ok((reading, name));
            }
            Ok(None) => warn!(source = name, kind, plant = plant.name, "no reading available"),
            Err(err) => warn!(
                source = name,
                kind,
                plant = plant.name,
                error = %format!("{err:#}"),
                "reading source failed"
            ),
        }
    }

    bail!("no source supplied a {} reading for {}", kind, plant.name)
}

pub fn acquire(sources: &mut [Box<dyn ReadingSource>], plant: &Plant) -> Result<Acquired> {
    let (radiation, radiation_source) =
        first_available(sources, "radiation", plant, |s| s.radiation(plant))?;
    let (weather, weather_source) =
        first_available(sources, "weather", plant, |s| s.weather(plant))?;
    let (air_quality, air_quality_source) =
        first_available(sources, "air quality", plant, |s| s.air_quality(plant))?;

    Ok(Acquired {
        readings: Readings {
            radiation,
            weather,
            air_quality,
        },
        provenance: Provenance {
            radiation: radiation_source,
            weather: weather_source,
            air_quality: air_quality_source,
        },
    })
}

/// Tourism is context for the `readings` view only, so a region nobody
/// covers is reported as absent instead of failing the run.
pub fn acquire_tourism(
    sources: &mut [Box<dyn ReadingSource>],
    plant: &Plant,
) -> Option<(TourismReading, &'static str)> {
    match first_available(sources, "tourism", plant, |s| s.tourism(plant)) {
        Ok(found) => Some(found),
        Err(err) => {
            warn!(plant = plant.name, error = %format!("{err:#}"), "tourism context unavailable");
            None
        }
    }
}
