use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiationReading {
    pub plant_name: String,
    pub measurement_time: DateTime<Utc>,
    /// μSv/h
    pub radiation_level: f64,
    pub unit: String,
    pub status: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindDirection {
    #[serde(rename = "북풍")]
    North,
    #[serde(rename = "북동풍")]
    NorthEast,
    #[serde(rename = "동풍")]
    East,
    #[serde(rename = "남동풍")]
    SouthEast,
    #[serde(rename = "남풍")]
    South,
    #[serde(rename = "남서풍")]
    SouthWest,
    #[serde(rename = "서풍")]
    West,
    #[serde(rename = "북서풍")]
    NorthWest,
}

impl WindDirection {
    pub const ALL: [WindDirection; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::North => "북풍",
            Self::NorthEast => "북동풍",
            Self::East => "동풍",
            Self::SouthEast => "남동풍",
            Self::South => "남풍",
            Self::SouthWest => "남서풍",
            Self::West => "서풍",
            Self::NorthWest => "북서풍",
        }
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub plant_name: String,
    pub measurement_time: DateTime<Utc>,
    /// °C
    pub temperature: f64,
    /// percent, 0-100
    pub humidity: f64,
    /// m/s
    pub wind_speed: f64,
    pub wind_direction: WindDirection,
    /// mm
    pub rainfall: f64,
}

/// Pollutant fields are independently optional; an absent field is skipped
/// by scoring rather than treated as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityReading {
    pub location: String,
    pub measurement_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm10: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm25: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub so2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonalTrend {
    #[serde(rename = "증가")]
    Increasing,
    #[serde(rename = "감소")]
    Decreasing,
    #[serde(rename = "유지")]
    Stable,
}

impl SeasonalTrend {
    pub const ALL: [SeasonalTrend; 3] = [Self::Increasing, Self::Decreasing, Self::Stable];

    pub fn label(self) -> &'static str {
        match self {
            Self::Increasing => "증가",
            Self::Decreasing => "감소",
            Self::Stable => "유지",
        }
    }
}

impl fmt::Display for SeasonalTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Visitor context for the region around a plant. Not part of the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourismReading {
    pub location: String,
    pub measurement_time: DateTime<Utc>,
    pub tourist_count: u32,
    #[serde(default)]
    pub popular_attractions: Vec<String>,
    /// 1-5
    pub safety_rating: u8,
    /// percent, 0-100
    pub accommodation_occupancy: u8,
    /// days
    pub average_stay_duration: u8,
    pub seasonal_trend: SeasonalTrend,
}

/// Ordered from best to worst, so `a > b` means `a` is the more severe grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SafetyGrade {
    #[serde(rename = "안전")]
    Safe,
    #[serde(rename = "주의")]
    Caution,
    #[serde(rename = "경고")]
    Warning,
    #[serde(rename = "위험")]
    Danger,
}

impl SafetyGrade {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::Safe,
            60..=79 => Self::Caution,
            40..=59 => Self::Warning,
            _ => Self::Danger,
        }
    }

    pub fn korean(self) -> &'static str {
        match self {
            Self::Safe => "안전",
            Self::Caution => "주의",
            Self::Warning => "경고",
            Self::Danger => "위험",
        }
    }

    pub fn english(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Caution => "Caution",
            Self::Warning => "Warning",
            Self::Danger => "Danger",
        }
    }
}

impl fmt::Display for SafetyGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.korean(), self.english())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyIndex {
    /// Empty until a persistence step assigns one.
    pub id: String,
    pub location: String,
    pub calculated_time: DateTime<Utc>,
    pub radiation_score: u8,
    pub air_quality_score: u8,
    pub weather_score: u8,
    pub overall_score: u8,
    pub safety_grade: SafetyGrade,
}
