use crate::core::model::{
    AirQualityReading, RadiationReading, SeasonalTrend, TourismReading, WeatherReading,
    WindDirection,
};
use crate::plants::Plant;
use crate::sources::ReadingSource;
use anyhow::Result;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const AIR_GRADES: [&str; 3] = ["좋음", "보통", "나쁨"];

fn attractions(short_name: &str) -> &'static [&'static str] {
    match short_name {
        "고리" => &["해운대 해수욕장", "기장 죽성리 벚꽃", "일광 해수욕장", "장안사"],
        "한빛" => &["칠산 바다", "백수 해안도로", "불갑사", "영광굴비거리"],
        "월성" => &["불국사", "석굴암", "경주 역사유적지구", "첨성대"],
        "한울" => &["망양 해수욕장", "울진 금강송 숲", "성류굴", "덕구온천"],
        "새울" => &["삼척 해수욕장", "환선굴", "대금굴", "이사부광장"],
        _ => &["지역 명소 1", "지역 명소 2", "지역 명소 3"],
    }
}

/// Plausible background readings for when no measured data is available.
pub struct SyntheticSource {
    rng: StdRng,
}

impl SyntheticSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

fn hundredths(value: f64) -> f64 {
    (value * 100.0).floor() / 100.0
}

impl ReadingSource for SyntheticSource {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn radiation(&mut self, plant: &Plant) -> Result<Option<RadiationReading>> {
        Ok(Some(RadiationReading {
            plant_name: plant.name.to_string(),
            measurement_time: Utc::now(),
            radiation_level: self.rng.gen_range(0.05..0.10),
            unit: "μSv/h".to_string(),
            status: "정상".to_string(),
            latitude: plant.latitude,
            longitude: plant.longitude,
        }))
    }

    fn weather(&mut self, plant: &Plant) -> Result<Option<WeatherReading>> {
        let wind_direction = *WindDirection::ALL
            .choose(&mut self.rng)
            .unwrap_or(&WindDirection::North);

        Ok(Some(WeatherReading {
            plant_name: plant.name.to_string(),
            measurement_time: Utc::now(),
            temperature: f64::from(self.rng.gen_range(15_i32..35)),
            humidity: f64::from(self.rng.gen_range(40_i32..80)),
            wind_speed: f64::from(self.rng.gen_range(1_i32..11)),
            wind_direction,
            rainfall: f64::from(self.rng.gen_range(0_i32..10)),
        }))
    }

    fn air_quality(&mut self, plant: &Plant) -> Result<Option<AirQualityReading>> {
        let grade = AIR_GRADES[self.rng.gen_range(0..AIR_GRADES.len())];

        Ok(Some(AirQualityReading {
            location: plant.region.to_string(),
            measurement_time: Utc::now(),
            pm10: Some(f64::from(self.rng.gen_range(10_i32..60))),
            pm25: Some(f64::from(self.rng.gen_range(5_i32..35))),
            o3: Some(hundredths(self.rng.gen_range(0.0..0.1))),
            no2: Some(hundredths(self.rng.gen_range(0.0..0.05))),
            so2: Some(hundredths(self.rng.gen_range(0.0..0.02))),
            co: Some(f64::from(self.rng.gen_range(1_i32..6))),
            overall_index: Some(self.rng.gen_range(1..=100)),
            grade: Some(grade.to_string()),
        }))
    }

    fn tourism(&mut self, plant: &Plant) -> Result<Option<TourismReading>> {
        let seasonal_trend = *SeasonalTrend::ALL
            .choose(&mut self.rng)
            .unwrap_or(&SeasonalTrend::Stable);

        Ok(Some(TourismReading {
            location: plant.region.to_string(),
            measurement_time: Utc::now(),
            tourist_count: self.rng.gen_range(1_000..11_000),
            popular_attractions: attractions(plant.short_name)
                .iter()
                .map(|name| name.to_string())
                .collect(),
            safety_rating: self.rng.gen_range(4..=5),
            accommodation_occupancy: self.rng.gen_range(60..100),
            average_stay_duration: self.rng.gen_range(1..=2),
            seasonal_trend,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::score;
    use crate::plants::PLANTS;

    #[test]
    fn seeded_sources_repeat() {
        let mut a = SyntheticSource::new(Some(42));
        let mut b = SyntheticSource::new(Some(42));
        let plant = &PLANTS[0];
        assert_eq!(
            a.radiation(plant).unwrap().unwrap().radiation_level,
            b.radiation(plant).unwrap().unwrap().radiation_level
        );
        let (wa, wb) = (a.weather(plant).unwrap().unwrap(), b.weather(plant).unwrap().unwrap());
        assert_eq!(wa.wind_speed, wb.wind_speed);
        assert_eq!(wa.wind_direction, wb.wind_direction);
    }

    #[test]
    fn readings_stay_in_background_ranges() {
        let mut source = SyntheticSource::new(Some(9));
        for plant in &PLANTS {
            for _ in 0..50 {
                let radiation = source.radiation(plant).unwrap().unwrap();
                assert!((0.05..0.10).contains(&radiation.radiation_level));
                assert_eq!(score::radiation_score(radiation.radiation_level), 100);

                let weather = source.weather(plant).unwrap().unwrap();
                assert!((1.0..=10.0).contains(&weather.wind_speed));
                assert!((15.0..=34.0).contains(&weather.temperature));
                assert!(weather.rainfall < 10.0);
                assert_eq!(weather.plant_name, plant.name);

                let air = source.air_quality(plant).unwrap().unwrap();
                assert_eq!(air.location, plant.region);
                assert!(air.pm25.is_some_and(|v| (5.0..35.0).contains(&v)));
                assert!(air.pm10.is_some_and(|v| (10.0..60.0).contains(&v)));
                assert!(air.overall_index.is_some_and(|v| (1..=100).contains(&v)));

                let tourism = source.tourism(plant).unwrap().unwrap();
                assert_eq!(tourism.location, plant.region);
                assert!((1_000..11_000).contains(&tourism.tourist_count));
                assert!((4..=5).contains(&tourism.safety_rating));
                assert!((60..100).contains(&tourism.accommodation_occupancy));
                assert!((1..=2).contains(&tourism.average_stay_duration));
                assert_eq!(tourism.popular_attractions.len(), 4);
            }
        }
    }
}
