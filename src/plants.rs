use anyhow::{Result, bail};
use serde::Serialize;

pub const ALL_LOCATIONS_LABEL: &str = "전체";
const PLANT_NAME_SUFFIX: &str = "원자력본부";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub name: &'static str,
    pub short_name: &'static str,
    pub english_name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    /// Administrative region whose air-quality station covers the plant.
    pub region: &'static str,
}

impl Plant {
    /// True when a reading's plant or location label refers to this plant.
    pub fn matches_label(&self, label: &str) -> bool {
        let label = label.trim();
        label == self.name
            || label == self.short_name
            || label == self.region
            || label.eq_ignore_ascii_case(self.english_name)
    }

    /// Tourism records are keyed by region or short name; a full plant name
    /// is reduced to its short name before comparing.
    pub fn matches_region(&self, location: &str) -> bool {
        let location = location.trim();
        let cleaned = location.replacen(PLANT_NAME_SUFFIX, "", 1);
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return false;
        }

        location == self.region
            || cleaned == self.short_name
            || self.region.contains(location)
            || self.region.contains(cleaned)
    }
}

pub static PLANTS: [Plant; 5] = [
    Plant {
        name: "고리원자력본부",
        short_name: "고리",
        english_name: "Kori",
        latitude: 35.2736,
        longitude: 129.2902,
        region: "부산광역시 기장군",
    },
    Plant {
        name: "한빛원자력본부",
        short_name: "한빛",
        english_name: "Hanbit",
        latitude: 35.4089,
        longitude: 126.4178,
        region: "전라남도 영광군",
    },
    Plant {
        name: "월성원자력본부",
        short_name: "월성",
        english_name: "Wolsong",
        latitude: 35.7175,
        longitude: 129.4844,
        region: "경상북도 경주시",
    },
    Plant {
        name: "한울원자력본부",
        short_name: "한울",
        english_name: "Hanul",
        latitude: 36.7628,
        longitude: 129.4097,
        region: "경상북도 울진군",
    },
    Plant {
        name: "새울원자력본부",
        short_name: "새울",
        english_name: "Saeul",
        latitude: 36.3392,
        longitude: 129.2981,
        region: "강원도 삼척시",
    },
];

pub fn default_plant() -> &'static Plant {
    &PLANTS[0]
}

pub fn find_plant(query: &str) -> Option<&'static Plant> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    PLANTS
        .iter()
        .find(|plant| plant.matches_label(query))
        .or_else(|| PLANTS.iter().find(|plant| plant.region.contains(query)))
}

/// The plant whose readings feed an assessment and the label the index is
/// reported under.
#[derive(Debug, Clone)]
pub struct Target {
    pub plant: &'static Plant,
    pub label: String,
}

pub fn resolve_target(location: Option<&str>) -> Result<Target> {
    let Some(query) = location else {
        return Ok(Target {
            plant: default_plant(),
            label: ALL_LOCATIONS_LABEL.to_string(),
        });
    };

    match find_plant(query) {
        Some(plant) => Ok(Target {
            plant,
            label: query.trim().to_string(),
        }),
        None => bail!(
            "unknown location {:?} (run `safenergy plants` to list known plants)",
            query
        ),
    }
}
