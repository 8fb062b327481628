//! Open-Meteo forecast API
//!
//! The hourly block is a set of parallel arrays indexed by time. Times are
//! local ISO strings (the request pins the timezone to Asia/Kolkata), wind
//! is already km/h and probabilities already percent; only visibility needs
//! converting from meters.

use minecast_core::IST;
use serde::Deserialize;
use time::{macros::format_description, PrimitiveDateTime};

use super::HourlySample;
use crate::domains::codes::{is_wmo_thunder, wmo_description};

pub fn forecast_url(latitude: f64, longitude: f64) -> String {
    format!(
        "https://api.open-meteo.com/v1/forecast?latitude={latitude}&longitude={longitude}\
         &hourly=temperature_2m,precipitation,weather_code,wind_speed_10m,precipitation_probability,visibility\
         &forecast_days=2&timezone=Asia%2FKolkata"
    )
}

#[derive(Debug, Deserialize)]
pub struct OpenMeteoForecast {
    pub hourly: Option<OpenMeteoHourly>,
}

/// Parallel arrays; entry `i` of each array describes the same hour.
/// Ragged or missing arrays degrade per field rather than dropping the hour.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OpenMeteoHourly {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
    pub precipitation: Vec<f64>,
    pub weather_code: Vec<i64>,
    pub wind_speed_10m: Vec<f64>,
    pub precipitation_probability: Vec<f64>,
    pub visibility: Option<Vec<f64>>,
}

impl OpenMeteoForecast {
    pub fn hourly_samples(&self) -> Vec<HourlySample> {
        let hourly = match &self.hourly {
            Some(hourly) => hourly,
            None => return Vec::new(),
        };

        let local_time = format_description!("[year]-[month]-[day]T[hour]:[minute]");
        let mut samples = Vec::with_capacity(hourly.time.len());
        for (i, raw_stamp) in hourly.time.iter().enumerate() {
            let stamp = match PrimitiveDateTime::parse(raw_stamp, local_time) {
                Ok(local) => local.assume_offset(IST),
                Err(_) => continue,
            };

            let code = hourly.weather_code.get(i).copied();
            let visibility_km = match &hourly.visibility {
                Some(values) => values.get(i).copied().unwrap_or(10_000.0) / 1000.0,
                None => 10.0,
            };

            samples.push(HourlySample {
                stamp,
                temp_c: hourly.temperature_2m.get(i).copied().unwrap_or(0.0),
                rain_mm: hourly.precipitation.get(i).copied().unwrap_or(0.0),
                pop_pct: hourly
                    .precipitation_probability
                    .get(i)
                    .copied()
                    .unwrap_or(0.0),
                wind_kmh: hourly.wind_speed_10m.get(i).copied().unwrap_or(0.0),
                visibility_km,
                description: match code {
                    Some(code) => wmo_description(code).to_string(),
                    None => String::from("Unknown Open-Meteo code"),
                },
                lightning: code.map(is_wmo_thunder).unwrap_or(false),
            });
        }
        samples
    }
}
