use crate::core::model::{AirQualityReading, RadiationReading, TourismReading, WeatherReading};
use crate::plants::Plant;
use crate::sources::ReadingSource;
use crate::utils::fs::read_json;
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    pub radiation: Vec<RadiationReading>,
    pub weather: Vec<WeatherReading>,
    pub air_quality: Vec<AirQualityReading>,
    pub tourism: Vec<TourismReading>,
}

/// Readings recorded ahead of time in a JSON document; the newest matching
/// reading wins.
pub struct SnapshotSource {
    snapshot: Snapshot,
}

impl SnapshotSource {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_snapshot(read_json(path)?))
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

impl ReadingSource for SnapshotSource {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn radiation(&mut self, plant: &Plant) -> Result<Option<RadiationReading>> {
        Ok(self
            .snapshot
            .radiation
            .iter()
            .filter(|reading| plant.matches_label(&reading.plant_name))
            .max_by_key(|reading| reading.measurement_time)
            .cloned())
    }

    fn weather(&mut self, plant: &Plant) -> Result<Option<WeatherReading>> {
        Ok(self
            .snapshot
            .weather
            .iter()
            .filter(|reading| plant.matches_label(&reading.plant_name))
            .max_by_key(|reading| reading.measurement_time)
            .cloned())
    }

    fn air_quality(&mut self, plant: &Plant) -> Result<Option<AirQualityReading>> {
        Ok(self
            .snapshot
            .air_quality
            .iter()
            .filter(|reading| plant.matches_label(&reading.location))
            .max_by_key(|reading| reading.measurement_time)
            .cloned())
    }

    fn tourism(&mut self, plant: &Plant) -> Result<Option<TourismReading>> {
        Ok(self
            .snapshot
            .tourism
            .iter()
            .filter(|reading| plant.matches_region(&reading.location))
            .max_by_key(|reading| reading.measurement_time)
            .cloned())
    }
}
