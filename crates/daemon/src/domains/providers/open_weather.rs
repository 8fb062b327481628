//! OpenWeatherMap One Call API 3.0
//!
//! Hourly entries carry epoch-second UTC timestamps, m/s wind, meter
//! visibility, fractional precipitation probability, and a condition list
//! with free-text descriptions plus numeric condition ids.

use minecast_core::IST;
use serde::Deserialize;
use time::OffsetDateTime;

use super::HourlySample;
use crate::domains::codes::is_open_weather_thunder;

pub fn forecast_url(latitude: f64, longitude: f64, api_key: &str) -> String {
    format!(
        "https://api.openweathermap.org/data/3.0/onecall?lat={latitude}&lon={longitude}\
         &units=metric&exclude=minutely,daily,alerts&appid={api_key}"
    )
}

#[derive(Debug, Deserialize)]
pub struct OpenWeatherForecast {
    #[serde(default)]
    pub hourly: Vec<OpenWeatherHour>,
}

#[derive(Debug, Deserialize)]
pub struct OpenWeatherHour {
    /// Unix timestamp, UTC
    pub dt: i64,
    #[serde(default)]
    pub temp: f64,
    /// Probability of precipitation as a fraction, 0..=1
    #[serde(default)]
    pub pop: f64,
    /// Wind speed in m/s
    #[serde(default)]
    pub wind_speed: f64,
    /// Average visibility in meters, capped by the API at 10 km
    pub visibility: Option<f64>,
    pub rain: Option<PrecipitationVolume>,
    pub snow: Option<PrecipitationVolume>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
pub struct PrecipitationVolume {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherCondition {
    pub id: i64,
    pub description: String,
}

impl OpenWeatherForecast {
    /// Flatten the hourly entries into normalized samples, skipping entries
    /// whose timestamp is out of range for a calendar date
    pub fn hourly_samples(&self) -> Vec<HourlySample> {
        let mut samples = Vec::with_capacity(self.hourly.len());
        for hour in &self.hourly {
            let stamp = match OffsetDateTime::from_unix_timestamp(hour.dt) {
                Ok(utc) => utc.to_offset(IST),
                Err(_) => continue,
            };

            let rain_mm = volume(&hour.rain) + volume(&hour.snow);
            let (description, lightning) = match hour.weather.first() {
                Some(condition) => (
                    condition.description.clone(),
                    is_open_weather_thunder(condition.id),
                ),
                None => (String::from("N/A"), false),
            };

            samples.push(HourlySample {
                stamp,
                temp_c: hour.temp,
                rain_mm,
                pop_pct: hour.pop * 100.0,
                wind_kmh: hour.wind_speed * 3.6,
                visibility_km: hour.visibility.unwrap_or(10_000.0) / 1000.0,
                description,
                lightning,
            });
        }
        samples
    }
}

fn volume(precipitation: &Option<PrecipitationVolume>) -> f64 {
    precipitation
        .as_ref()
        .and_then(|v| v.one_hour)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod test {
    use super::*;
    use time::macros::datetime;

    fn sample_document() -> OpenWeatherForecast {
        serde_json::from_value(serde_json::json!({
            "lat": 21.85,
            "lon": 84.02,
            "timezone": "Asia/Kolkata",
            "hourly": [
                {
                    "dt": 1752739200,
                    "temp": 28.4,
                    "pop": 0.45,
                    "wind_speed": 5.0,
                    "visibility": 8000,
                    "rain": {"1h": 1.2},
                    "snow": {"1h": 0.3},
                    "weather": [{"id": 201, "main": "Thunderstorm", "description": "thunderstorm with rain"}]
                },
                {
                    "dt": 1752742800,
                    "temp": 27.0,
                    "wind_speed": 2.5,
                    "weather": []
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn converts_units_and_flags_thunder() {
        let samples = sample_document().hourly_samples();
        assert_eq!(samples.len(), 2);

        let first = &samples[0];
        // 2025-07-17 08:00 UTC is 13:30 IST
        assert_eq!(first.stamp, datetime!(2025-07-17 13:30 +5:30));
        assert_eq!(first.temp_c, 28.4);
        assert_eq!(first.rain_mm, 1.5);
        assert_eq!(first.pop_pct, 45.0);
        assert_eq!(first.wind_kmh, 18.0);
        assert_eq!(first.visibility_km, 8.0);
        assert_eq!(first.description, "thunderstorm with rain");
        assert!(first.lightning);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let samples = sample_document().hourly_samples();
        let second = &samples[1];
        assert_eq!(second.rain_mm, 0.0);
        assert_eq!(second.pop_pct, 0.0);
        assert_eq!(second.visibility_km, 10.0);
        assert_eq!(second.description, "N/A");
        assert!(!second.lightning);
    }

    #[test]
    fn document_without_hourly_block_yields_no_samples() {
        let doc: OpenWeatherForecast = serde_json::from_value(serde_json::json!({
            "lat": 21.85,
            "lon": 84.02
        }))
        .unwrap();
        assert!(doc.hourly_samples().is_empty());
    }
}
