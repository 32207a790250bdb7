use crate::core::model::{SafetyGrade, WeatherReading};
use crate::core::score::{RAIN_MM, STRONG_WIND_MS};
use chrono::{DateTime, Duration, Utc};
use clap::ValueEnum;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum SkyCondition {
    #[serde(rename = "맑음")]
    Clear,
    #[serde(rename = "흐림")]
    Cloudy,
    #[serde(rename = "비")]
    Rain,
    #[serde(rename = "강풍")]
    Gale,
    #[serde(rename = "태풍")]
    Typhoon,
}

impl SkyCondition {
    fn adjustment(self) -> i32 {
        match self {
            Self::Clear => 5,
            Self::Cloudy => 0,
            Self::Rain => -10,
            Self::Gale => -15,
            Self::Typhoon => -30,
        }
    }

    /// Typhoons are never inferred; they must be stated explicitly.
    pub fn from_reading(reading: &WeatherReading) -> Self {
        if reading.wind_speed >= STRONG_WIND_MS {
            Self::Gale
        } else if reading.rainfall >= RAIN_MM {
            Self::Rain
        } else if reading.rainfall > 0.0 {
            Self::Cloudy
        } else {
            Self::Clear
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum Trend {
    #[serde(rename = "개선")]
    Improving,
    #[serde(rename = "유지")]
    Steady,
    #[serde(rename = "악화")]
    Worsening,
}

impl Trend {
    fn adjustment(self) -> i32 {
        match self {
            Self::Improving => 10,
            Self::Steady => 0,
            Self::Worsening => -15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    pub radiation_level: f64,
    pub air_quality_index: f64,
    pub sky: SkyCondition,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastFactor {
    Radiation,
    AirQuality,
    Weather,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub id: String,
    pub location: String,
    pub prediction_time: DateTime<Utc>,
    pub target_time: DateTime<Utc>,
    pub predicted_safety_score: u8,
    pub predicted_grade: SafetyGrade,
    pub confidence: u8,
    pub factors: Vec<ForecastFactor>,
    pub recommendations: Vec<String>,
}

pub fn predict_score(conditions: &Conditions) -> u8 {
    let mut score = 80_i32;

    score -= if conditions.radiation_level > 0.1 {
        30
    } else if conditions.radiation_level > 0.08 {
        15
    } else if conditions.radiation_level > 0.06 {
        5
    } else {
        0
    };

    score -= if conditions.air_quality_index > 80.0 {
        25
    } else if conditions.air_quality_index > 50.0 {
        10
    } else if conditions.air_quality_index > 30.0 {
        5
    } else {
        0
    };

    score += conditions.sky.adjustment();
    score += conditions.trend.adjustment();

    score.clamp(0, 100) as u8
}

pub fn contributing_factors(conditions: &Conditions) -> Vec<ForecastFactor> {
    let mut factors = Vec::new();
    if conditions.radiation_level > 0.08 {
        factors.push(ForecastFactor::Radiation);
    }
    if conditions.air_quality_index > 50.0 {
        factors.push(ForecastFactor::AirQuality);
    }
    if conditions.sky != SkyCondition::Clear {
        factors.push(ForecastFactor::Weather);
    }
    factors
}

pub fn recommendations(score: u8, factors: &[ForecastFactor]) -> Vec<String> {
    let mut out = Vec::new();

    if score < 60 {
        out.push("Limit outdoor activity.".to_string());
        out.push("Wearing a mask is recommended.".to_string());
    }
    if factors.contains(&ForecastFactor::Radiation) {
        out.push("Keep checking radiation monitoring updates.".to_string());
    }
    if factors.contains(&ForecastFactor::AirQuality) {
        out.push("Minimize ventilation and run an air purifier.".to_string());
    }
    if factors.contains(&ForecastFactor::Weather) {
        out.push("Follow official weather advisories closely.".to_string());
    }
    if score >= 80 {
        out.push("Conditions are safe for outdoor activity.".to_string());
        out.push("Enjoy tourism and recreation in the area.".to_string());
    }

    out
}

/// Coarse heuristic, not a model: one prediction per hour for `1..=hours`,
/// each with up to ±5% jitter on radiation and air-quality index. Factors
/// come from the unjittered conditions.
pub fn forecast<R: Rng>(
    location: &str,
    conditions: &Conditions,
    hours: u32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Prediction> {
    let factors = contributing_factors(conditions);

    (1..=hours)
        .map(|hour| {
            let variation: f64 = rng.gen_range(-0.05..0.05);
            let jittered = Conditions {
                radiation_level: conditions.radiation_level * (1.0 + variation),
                air_quality_index: conditions.air_quality_index * (1.0 + variation),
                ..*conditions
            };
            let score = predict_score(&jittered);

            Prediction {
                id: format!("prediction-{location}-{hour}"),
                location: location.to_string(),
                prediction_time: now,
                target_time: now + Duration::hours(i64::from(hour)),
                predicted_safety_score: score,
                predicted_grade: SafetyGrade::from_score(score),
                confidence: rng.gen_range(90..=100),
                factors: factors.clone(),
                recommendations: recommendations(score, &factors),
            }
        })
        .collect()
}
