use crate::config::{Config, FailOn};
use crate::core::model::{SafetyGrade, SafetyIndex, TourismReading};
use crate::core::prediction::Prediction;
use crate::core::score::{AIR_QUALITY_WEIGHT, Penalty, RADIATION_WEIGHT, WEATHER_WEIGHT};
use crate::plants::Plant;
use crate::sources::{Acquired, Provenance, Readings};
use crate::store::Stored;
use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use serde::Serialize;

fn colored_grade(grade: SafetyGrade) -> ColoredString {
    let label = grade.to_string();
    let label = label.as_str();
    match grade {
        SafetyGrade::Safe => label.green().bold(),
        SafetyGrade::Caution => label.yellow().bold(),
        SafetyGrade::Warning => label.truecolor(255, 140, 0).bold(),
        SafetyGrade::Danger => label.red().bold(),
    }
}

#[derive(Debug, Clone)]
pub struct ExitStatus {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ExitStatus {
    pub fn reason_line(&self) -> String {
        self.reasons.join("; ")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub fail_on: FailOn,
    pub min_score: u8,
}

#[derive(Debug, Clone)]
pub struct FinalReport {
    pub index: SafetyIndex,
    pub readings: Readings,
    pub provenance: Provenance,
    pub penalties: Vec<Penalty>,
    pub stored: Stored,
    pub config: ConfigSummary,
    pub exit: ExitStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    pub safety_index: SafetyIndex,
    pub readings: Readings,
    pub sources: Provenance,
    pub penalties: Vec<Penalty>,
    pub stored: Stored,
    pub config: ConfigSummary,
    pub ok: bool,
}

impl From<&FinalReport> for JsonReport {
    fn from(report: &FinalReport) -> Self {
        Self {
            safety_index: report.index.clone(),
            readings: report.readings.clone(),
            sources: report.provenance.clone(),
            penalties: report.penalties.clone(),
            stored: report.stored.clone(),
            config: report.config.clone(),
            ok: report.exit.ok,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReadings<'a> {
    pub plant: &'a Plant,
    pub readings: &'a Readings,
    pub sources: &'a Provenance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tourism: Option<&'a TourismReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tourism_source: Option<&'static str>,
}

impl<'a> JsonReadings<'a> {
    pub fn new(
        plant: &'a Plant,
        acquired: &'a Acquired,
        tourism: Option<&'a (TourismReading, &'static str)>,
    ) -> Self {
        Self {
            plant,
            readings: &acquired.readings,
            sources: &acquired.provenance,
            tourism: tourism.map(|(reading, _)| reading),
            tourism_source: tourism.map(|(_, source)| *source),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonForecast<'a> {
    pub location: &'a str,
    pub prediction_count: usize,
    pub predictions: &'a [Prediction],
    pub generated_at: DateTime<Utc>,
}

pub fn evaluate_exit(index: &SafetyIndex, cfg: &Config) -> ExitStatus {
    let mut reasons = Vec::new();

    if index.overall_score < cfg.general.min_score {
        reasons.push(format!(
            "score {} is below min_score {}",
            index.overall_score, cfg.general.min_score
        ));
    }

    if let Some(threshold) = cfg.general.fail_on.threshold() {
        if index.safety_grade >= threshold {
            reasons.push(format!(
                "grade {} is at or above fail_on {}",
                index.safety_grade.english().to_lowercase(),
                cfg.general.fail_on
            ));
        }
    }

    ExitStatus {
        ok: reasons.is_empty(),
        reasons,
    }
}

pub fn print_human(report: &FinalReport) {
    let index = &report.index;
    println!(
        "Safety Index: {}/100 {}",
        index.overall_score,
        colored_grade(index.safety_grade)
    );
    println!(
        "location: {}  calculated: {}",
        index.location,
        index.calculated_time.format("%Y-%m-%d %H:%M:%S UTC")
    );

    println!();
    println!(
        "  radiation    {:>3}  (weight {}%, {})",
        index.radiation_score, RADIATION_WEIGHT, report.provenance.radiation
    );
    println!(
        "  air quality  {:>3}  (weight {}%, {})",
        index.air_quality_score, AIR_QUALITY_WEIGHT, report.provenance.air_quality
    );
    println!(
        "  weather      {:>3}  (weight {}%, {})",
        index.weather_score, WEATHER_WEIGHT, report.provenance.weather
    );

    if !report.penalties.is_empty() {
        println!();
        println!("{} ({})", "FACTORS".yellow().bold(), report.penalties.len());
        for penalty in &report.penalties {
            println!("[{}] {} -> capped at {}", penalty.factor, penalty.detail, penalty.cap);
        }
    }

    println!();
    match &report.stored {
        Stored::Saved { path } => println!("stored: {} ({})", index.id, path.display()),
        Stored::Failed { reason } => {
            println!("stored: {} ({})", "not saved".yellow(), reason)
        }
        Stored::Skipped => println!("stored: skipped"),
    }

    if report.exit.ok {
        println!("exit: OK");
    } else {
        println!("exit: FAILED ({})", report.exit.reason_line());
    }
}

pub fn print_plants(plants: &[Plant]) {
    for plant in plants {
        println!(
            "{} ({}, {})  {:.4}, {:.4}  air-quality region: {}",
            plant.name.bold(),
            plant.short_name,
            plant.english_name,
            plant.latitude,
            plant.longitude,
            plant.region
        );
    }
}

pub fn print_readings(
    plant: &Plant,
    acquired: &Acquired,
    tourism: Option<&(TourismReading, &'static str)>,
) {
    let Readings {
        radiation,
        weather,
        air_quality,
    } = &acquired.readings;
    let optional = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{v}"));

    println!("{} ({})", plant.name.bold(), plant.english_name);
    println!(
        "  radiation    {:.3} {} [{}]  ({})",
        radiation.radiation_level, radiation.unit, radiation.status, acquired.provenance.radiation
    );
    println!(
        "  weather      {:.1} °C, humidity {:.0}%, wind {:.1} m/s {}, rain {:.1} mm  ({})",
        weather.temperature,
        weather.humidity,
        weather.wind_speed,
        weather.wind_direction,
        weather.rainfall,
        acquired.provenance.weather
    );
    println!(
        "  air quality  PM2.5 {}  PM10 {}  O3 {}  NO2 {}  SO2 {}  CO {}  grade {}  ({})",
        optional(air_quality.pm25),
        optional(air_quality.pm10),
        optional(air_quality.o3),
        optional(air_quality.no2),
        optional(air_quality.so2),
        optional(air_quality.co),
        air_quality.grade.as_deref().unwrap_or("-"),
        acquired.provenance.air_quality
    );
    match tourism {
        Some((reading, source)) => {
            println!(
                "  tourism      {} visitors, rating {}/5, occupancy {}%, stay {} d, trend {}  ({})",
                reading.tourist_count,
                reading.safety_rating,
                reading.accommodation_occupancy,
                reading.average_stay_duration,
                reading.seasonal_trend,
                source
            );
            if !reading.popular_attractions.is_empty() {
                println!("               {}", reading.popular_attractions.join(", "));
            }
        }
        None => println!("  tourism      -"),
    }
}

pub fn print_forecast(predictions: &[Prediction]) {
    let Some(first) = predictions.first() else {
        println!("no predictions requested");
        return;
    };

    println!(
        "Forecast for {} ({} hours from {})",
        first.location,
        predictions.len(),
        first.prediction_time.format("%Y-%m-%d %H:%M UTC")
    );
    for prediction in predictions {
        println!(
            "  {}  {:>3}  {}  confidence {}%",
            prediction.target_time.format("%m-%d %H:%M"),
            prediction.predicted_safety_score,
            colored_grade(prediction.predicted_grade),
            prediction.confidence
        );
    }

    if !first.recommendations.is_empty() {
        println!();
        for line in &first.recommendations {
            println!("-> {}", line);
        }
    }
}
