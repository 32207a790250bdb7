use crate::core::model::{
    AirQualityReading, RadiationReading, SafetyGrade, SafetyIndex, WeatherReading,
};
use chrono::Utc;
use serde::Serialize;
use std::fmt;

// Weights in percent; they sum to 100.
pub const RADIATION_WEIGHT: u32 = 40;
pub const AIR_QUALITY_WEIGHT: u32 = 35;
pub const WEATHER_WEIGHT: u32 = 25;

const RADIATION_STEPS: [(f64, u8); 4] = [(0.1, 100), (0.3, 80), (1.0, 60), (2.0, 40)];
const RADIATION_FLOOR: u8 = 20;

const PM25_STEPS: [(f64, u8); 3] = [(15.0, 100), (35.0, 80), (75.0, 60)];
const PM10_STEPS: [(f64, u8); 3] = [(30.0, 100), (80.0, 80), (150.0, 60)];
const PM_FLOOR: u8 = 40;

pub const STRONG_WIND_MS: f64 = 14.0;
pub const WINDY_MS: f64 = 10.0;
pub const HEAVY_RAIN_MM: f64 = 20.0;
pub const RAIN_MM: f64 = 10.0;
pub const HOT_CELSIUS: f64 = 35.0;
pub const COLD_CELSIUS: f64 = -10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Radiation,
    Pm25,
    Pm10,
    Wind,
    Rainfall,
    Temperature,
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radiation => write!(f, "Radiation"),
            Self::Pm25 => write!(f, "PM2.5"),
            Self::Pm10 => write!(f, "PM10"),
            Self::Wind => write!(f, "Wind"),
            Self::Rainfall => write!(f, "Rainfall"),
            Self::Temperature => write!(f, "Temperature"),
        }
    }
}

/// A threshold that fired and the score it caps its component at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Penalty {
    pub factor: Factor,
    pub cap: u8,
    pub detail: String,
}

impl Penalty {
    fn new(factor: Factor, cap: u8, detail: impl Into<String>) -> Self {
        Self {
            factor,
            cap,
            detail: detail.into(),
        }
    }
}

fn step_score(value: f64, steps: &[(f64, u8)], floor: u8) -> u8 {
    steps
        .iter()
        .find(|(upper, _)| value <= *upper)
        .map_or(floor, |(_, score)| *score)
}

fn worst(penalties: &[Penalty]) -> u8 {
    penalties.iter().map(|p| p.cap).fold(100, u8::min)
}

pub fn radiation_score(radiation_level: f64) -> u8 {
    step_score(radiation_level, &RADIATION_STEPS, RADIATION_FLOOR)
}

pub fn radiation_penalties(radiation_level: f64) -> Vec<Penalty> {
    let score = radiation_score(radiation_level);
    if score == 100 {
        return Vec::new();
    }
    vec![Penalty::new(
        Factor::Radiation,
        score,
        format!("radiation {radiation_level:.3} μSv/h above background"),
    )]
}

pub fn air_quality_penalties(reading: &AirQualityReading) -> Vec<Penalty> {
    let mut penalties = Vec::new();

    if let Some(pm25) = reading.pm25 {
        let score = step_score(pm25, &PM25_STEPS, PM_FLOOR);
        if score < 100 {
            penalties.push(Penalty::new(
                Factor::Pm25,
                score,
                format!("PM2.5 {pm25:.1} μg/m³"),
            ));
        }
    }

    if let Some(pm10) = reading.pm10 {
        let score = step_score(pm10, &PM10_STEPS, PM_FLOOR);
        if score < 100 {
            penalties.push(Penalty::new(
                Factor::Pm10,
                score,
                format!("PM10 {pm10:.1} μg/m³"),
            ));
        }
    }

    penalties
}

/// Worst pollutant wins; 100 when neither PM2.5 nor PM10 was measured.
pub fn air_quality_score(reading: &AirQualityReading) -> u8 {
    worst(&air_quality_penalties(reading))
}

pub fn weather_penalties(reading: &WeatherReading) -> Vec<Penalty> {
    let mut penalties = Vec::new();

    if reading.wind_speed >= STRONG_WIND_MS {
        penalties.push(Penalty::new(
            Factor::Wind,
            60,
            format!("wind {:.1} m/s >= {STRONG_WIND_MS}", reading.wind_speed),
        ));
    } else if reading.wind_speed >= WINDY_MS {
        penalties.push(Penalty::new(
            Factor::Wind,
            80,
            format!("wind {:.1} m/s >= {WINDY_MS}", reading.wind_speed),
        ));
    }

    if reading.rainfall >= HEAVY_RAIN_MM {
        penalties.push(Penalty::new(
            Factor::Rainfall,
            60,
            format!("rainfall {:.1} mm >= {HEAVY_RAIN_MM}", reading.rainfall),
        ));
    } else if reading.rainfall >= RAIN_MM {
        penalties.push(Penalty::new(
            Factor::Rainfall,
            80,
            format!("rainfall {:.1} mm >= {RAIN_MM}", reading.rainfall),
        ));
    }

    if reading.temperature >= HOT_CELSIUS || reading.temperature <= COLD_CELSIUS {
        penalties.push(Penalty::new(
            Factor::Temperature,
            70,
            format!(
                "temperature {:.1} °C outside ({COLD_CELSIUS}, {HOT_CELSIUS})",
                reading.temperature
            ),
        ));
    }

    penalties
}

/// Each check caps the score; caps compose by minimum, never by summing.
pub fn weather_score(reading: &WeatherReading) -> u8 {
    worst(&weather_penalties(reading))
}

pub fn overall_score(radiation: u8, air_quality: u8, weather: u8) -> u8 {
    let weighted = u32::from(radiation) * RADIATION_WEIGHT
        + u32::from(air_quality) * AIR_QUALITY_WEIGHT
        + u32::from(weather) * WEATHER_WEIGHT;
    // exact in integers; +50 rounds halves up, same as half-away-from-zero here
    ((weighted + 50) / 100).min(100) as u8
}

pub fn calculate_safety_index(
    radiation: &RadiationReading,
    weather: &WeatherReading,
    air_quality: &AirQualityReading,
    location: &str,
) -> SafetyIndex {
    let radiation_score = radiation_score(radiation.radiation_level);
    let air_quality_score = air_quality_score(air_quality);
    let weather_score = weather_score(weather);
    let overall_score = overall_score(radiation_score, air_quality_score, weather_score);

    SafetyIndex {
        id: String::new(),
        location: location.to_string(),
        calculated_time: Utc::now(),
        radiation_score,
        air_quality_score,
        weather_score,
        overall_score,
        safety_grade: SafetyGrade::from_score(overall_score),
    }
}

/// Every threshold that fired across the three readings, radiation first.
pub fn all_penalties(
    radiation: &RadiationReading,
    weather: &WeatherReading,
    air_quality: &AirQualityReading,
) -> Vec<Penalty> {
    let mut penalties = radiation_penalties(radiation.radiation_level);
    penalties.extend(air_quality_penalties(air_quality));
    penalties.extend(weather_penalties(weather));
    penalties
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::model::WindDirection;
    use chrono::TimeZone;
    use proptest::prelude::*;

    pub(crate) fn radiation(level: f64) -> RadiationReading {
        RadiationReading {
            plant_name: "고리원자력본부".to_string(),
            measurement_time: Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap(),
            radiation_level: level,
            unit: "μSv/h".to_string(),
            status: "정상".to_string(),
            latitude: 35.2736,
            longitude: 129.2902,
        }
    }

    pub(crate) fn weather(wind_speed: f64, rainfall: f64, temperature: f64) -> WeatherReading {
        WeatherReading {
            plant_name: "고리원자력본부".to_string(),
            measurement_time: Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap(),
            temperature,
            humidity: 55.0,
            wind_speed,
            wind_direction: WindDirection::East,
            rainfall,
        }
    }

    pub(crate) fn air(pm25: Option<f64>, pm10: Option<f64>) -> AirQualityReading {
        AirQualityReading {
            location: "부산광역시 기장군".to_string(),
            measurement_time: Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap(),
            pm10,
            pm25,
            o3: Some(0.03),
            no2: None,
            so2: None,
            co: None,
            overall_index: None,
            grade: None,
        }
    }

    #[test]
    fn radiation_thresholds_are_inclusive() {
        assert_eq!(radiation_score(0.0), 100);
        assert_eq!(radiation_score(0.1), 100);
        assert_eq!(radiation_score(0.1001), 80);
        assert_eq!(radiation_score(0.3), 80);
        assert_eq!(radiation_score(1.0), 60);
        assert_eq!(radiation_score(2.0), 40);
        assert_eq!(radiation_score(2.0001), 20);
        assert_eq!(radiation_score(50.0), 20);
    }

    #[test]
    fn air_quality_without_particulates_is_clean() {
        assert_eq!(air_quality_score(&air(None, None)), 100);
        assert!(air_quality_penalties(&air(None, None)).is_empty());
    }

    #[test]
    fn air_quality_takes_worst_pollutant() {
        assert_eq!(air_quality_score(&air(Some(10.0), Some(100.0))), 60);
        assert_eq!(air_quality_score(&air(Some(40.0), Some(20.0))), 60);
        assert_eq!(air_quality_score(&air(Some(20.0), Some(50.0))), 80);
        assert_eq!(air_quality_score(&air(Some(90.0), None)), 40);
        assert_eq!(air_quality_score(&air(None, Some(151.0))), 40);
        assert_eq!(air_quality_score(&air(Some(15.0), Some(30.0))), 100);
    }

    #[test]
    fn calm_weather_scores_full() {
        assert_eq!(weather_score(&weather(9.9, 9.9, 34.9)), 100);
        assert_eq!(weather_score(&weather(0.0, 0.0, -9.9)), 100);
    }

    #[test]
    fn weather_caps_compose_by_minimum() {
        assert_eq!(weather_score(&weather(15.0, 25.0, 40.0)), 60);
        assert_eq!(weather_penalties(&weather(15.0, 25.0, 40.0)).len(), 3);
        assert_eq!(weather_score(&weather(10.0, 10.0, 20.0)), 80);
        assert_eq!(weather_score(&weather(10.0, 0.0, 35.0)), 70);
        assert_eq!(weather_score(&weather(2.0, 0.0, -10.0)), 70);
        assert_eq!(weather_score(&weather(14.0, 0.0, 20.0)), 60);
        assert_eq!(weather_score(&weather(2.0, 20.0, 20.0)), 60);
    }

    #[test]
    fn overall_rounds_half_up() {
        assert_eq!(overall_score(100, 60, 70), 79);
        assert_eq!(overall_score(40, 40, 60), 45);
        assert_eq!(overall_score(100, 100, 100), 100);
        assert_eq!(overall_score(20, 40, 60), 37);
        assert_eq!(overall_score(20, 40, 70), 40);
    }

    #[test]
    fn overall_matches_weighted_sum_over_all_combinations() {
        let values = [20_u8, 40, 60, 70, 80, 100];
        for r in values {
            for a in values {
                for w in values {
                    let expected =
                        (f64::from(r) * 0.40 + f64::from(a) * 0.35 + f64::from(w) * 0.25).round();
                    assert_eq!(f64::from(overall_score(r, a, w)), expected, "{r} {a} {w}");
                }
            }
        }
    }

    #[test]
    fn clean_conditions_are_safe() {
        let index = calculate_safety_index(
            &radiation(0.05),
            &weather(2.0, 0.0, 20.0),
            &air(Some(10.0), Some(20.0)),
            "고리원자력본부",
        );
        assert_eq!(index.radiation_score, 100);
        assert_eq!(index.air_quality_score, 100);
        assert_eq!(index.weather_score, 100);
        assert_eq!(index.overall_score, 100);
        assert_eq!(index.safety_grade, SafetyGrade::Safe);
        assert_eq!(index.location, "고리원자력본부");
        assert!(index.id.is_empty());
    }

    #[test]
    fn degraded_conditions_are_warning() {
        let index = calculate_safety_index(
            &radiation(1.5),
            &weather(16.0, 5.0, 25.0),
            &air(Some(90.0), None),
            "전체",
        );
        assert_eq!(index.radiation_score, 40);
        assert_eq!(index.air_quality_score, 40);
        assert_eq!(index.weather_score, 60);
        assert_eq!(index.overall_score, 45);
        assert_eq!(index.safety_grade, SafetyGrade::Warning);
    }

    #[test]
    fn repeated_calls_agree() {
        let r = radiation(0.4);
        let w = weather(11.0, 12.0, -12.0);
        let a = air(Some(50.0), Some(90.0));
        let first = calculate_safety_index(&r, &w, &a, "월성");
        let second = calculate_safety_index(&r, &w, &a, "월성");
        assert_eq!(first.overall_score, second.overall_score);
        assert_eq!(first.safety_grade, second.safety_grade);
        assert_eq!(
            (first.radiation_score, first.air_quality_score, first.weather_score),
            (second.radiation_score, second.air_quality_score, second.weather_score)
        );
    }

    #[test]
    fn penalties_explain_sub_scores() {
        let penalties = all_penalties(
            &radiation(0.5),
            &weather(16.0, 0.0, 20.0),
            &air(Some(20.0), None),
        );
        let factors: Vec<Factor> = penalties.iter().map(|p| p.factor).collect();
        assert_eq!(factors, vec![Factor::Radiation, Factor::Pm25, Factor::Wind]);
        assert_eq!(penalties[0].cap, 60);
    }

    proptest! {
        #[test]
        fn radiation_is_non_increasing(a in 0.0f64..10.0, b in 0.0f64..10.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(radiation_score(lo) >= radiation_score(hi));
        }

        #[test]
        fn air_quality_is_non_increasing_per_pollutant(
            pm25 in 0.0f64..300.0,
            pm10 in 0.0f64..300.0,
            bump in 0.0f64..100.0,
        ) {
            let base = air_quality_score(&air(Some(pm25), Some(pm10)));
            prop_assert!(air_quality_score(&air(Some(pm25 + bump), Some(pm10))) <= base);
            prop_assert!(air_quality_score(&air(Some(pm25), Some(pm10 + bump))) <= base);
        }

        #[test]
        fn strong_wind_always_caps_at_sixty(
            wind in 14.0f64..60.0,
            rain in 0.0f64..100.0,
            temp in -30.0f64..50.0,
        ) {
            prop_assert_eq!(weather_score(&weather(wind, rain, temp)), 60);
        }

        #[test]
        fn calm_weather_always_scores_full(
            wind in 0.0f64..10.0,
            rain in 0.0f64..10.0,
            temp in -9.99f64..35.0,
        ) {
            prop_assert_eq!(weather_score(&weather(wind, rain, temp)), 100);
            prop_assert!(weather_penalties(&weather(wind, rain, temp)).is_empty());
        }

        #[test]
        fn overall_stays_in_range(r in 0u8..=100, a in 0u8..=100, w in 0u8..=100) {
            let score = overall_score(r, a, w);
            prop_assert!(score <= 100);
            prop_assert!(score >= r.min(a).min(w));
            prop_assert!(score <= r.max(a).max(w));
        }
    }
}
