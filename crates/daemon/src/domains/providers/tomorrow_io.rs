//! Tomorrow.io /v4/weather/forecast
//!
//! Hourly intervals live under `timelines.hourly`, timestamped in UTC with a
//! trailing `Z`. Wind is converted from m/s and visibility from meters; the
//! numeric weatherCode vocabulary is provider-specific.

use minecast_core::IST;
use serde::Deserialize;
use time::{macros::format_description, PrimitiveDateTime};

use super::HourlySample;
use crate::domains::codes::{is_tomorrow_io_thunder, tomorrow_io_description};

pub fn forecast_url(latitude: f64, longitude: f64, api_key: &str) -> String {
    format!(
        "https://api.tomorrow.io/v4/weather/forecast?location={latitude},{longitude}\
         &units=metric&apikey={api_key}"
    )
}

#[derive(Debug, Deserialize)]
pub struct TomorrowIoForecast {
    pub timelines: Option<TomorrowIoTimelines>,
}

#[derive(Debug, Deserialize)]
pub struct TomorrowIoTimelines {
    #[serde(default)]
    pub hourly: Vec<TomorrowIoInterval>,
}

#[derive(Debug, Deserialize)]
pub struct TomorrowIoInterval {
    /// UTC, `YYYY-MM-DDTHH:MM:SSZ`
    pub time: String,
    #[serde(default)]
    pub values: TomorrowIoValues,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TomorrowIoValues {
    pub temperature: Option<f64>,
    pub precipitation_intensity: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub wind_speed: Option<f64>,
    pub visibility: Option<f64>,
    pub weather_code: Option<i64>,
    pub lightning_strike_count: Option<f64>,
}

impl TomorrowIoForecast {
    pub fn hourly_samples(&self) -> Vec<HourlySample> {
        let timelines = match &self.timelines {
            Some(timelines) => timelines,
            None => return Vec::new(),
        };

        let utc_time = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
        let mut samples = Vec::with_capacity(timelines.hourly.len());
        for interval in &timelines.hourly {
            let stamp = match PrimitiveDateTime::parse(&interval.time, utc_time) {
                Ok(parsed) => parsed.assume_utc().to_offset(IST),
                Err(_) => continue,
            };

            let values = &interval.values;
            let code = values.weather_code;
            let strikes = values.lightning_strike_count.unwrap_or(0.0);

            samples.push(HourlySample {
                stamp,
                temp_c: values.temperature.unwrap_or(0.0),
                rain_mm: values.precipitation_intensity.unwrap_or(0.0),
                pop_pct: values.precipitation_probability.unwrap_or(0.0),
                wind_kmh: values.wind_speed.unwrap_or(0.0) * 3.6,
                visibility_km: values.visibility.unwrap_or(10_000.0) / 1000.0,
                description: match code {
                    Some(code) => tomorrow_io_description(code).to_string(),
                    None => String::from("N/A"),
                },
                lightning: strikes > 0.0 || code.map(is_tomorrow_io_thunder).unwrap_or(false),
            });
        }
        samples
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use time::macros::datetime;

    fn sample_document() -> TomorrowIoForecast {
        serde_json::from_value(serde_json::json!({
            "timelines": {
                "hourly": [
                    {
                        "time": "2025-07-17T08:00:00Z",
                        "values": {
                            "temperature": 29.5,
                            "precipitationIntensity": 1.4,
                            "precipitationProbability": 55.0,
                            "windSpeed": 10.0,
                            "visibility": 2000.0,
                            "weatherCode": 4001
                        }
                    },
                    {
                        "time": "2025-07-17T09:00:00Z",
                        "values": {
                            "weatherCode": 1000,
                            "lightningStrikeCount": 2.0
                        }
                    },
                    {
                        "time": "2025-07-17T10:00:00Z",
                        "values": {
                            "weatherCode": 8000
                        }
                    }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn converts_units_and_utc_timestamps() {
        let samples = sample_document().hourly_samples();
        assert_eq!(samples.len(), 3);

        let first = &samples[0];
        // 2025-07-17 08:00 UTC is 13:30 IST
        assert_eq!(first.stamp, datetime!(2025-07-17 13:30 +5:30));
        assert_eq!(first.temp_c, 29.5);
        assert_eq!(first.rain_mm, 1.4);
        assert_eq!(first.pop_pct, 55.0);
        assert_eq!(first.wind_kmh, 36.0);
        assert_eq!(first.visibility_km, 2.0);
        assert_eq!(first.description, "Rain");
        assert!(!first.lightning);
    }

    #[test]
    fn strike_count_or_thunder_code_sets_lightning() {
        let samples = sample_document().hourly_samples();
        assert!(samples[1].lightning);
        assert_eq!(samples[1].description, "Clear, Sunny");

        assert!(samples[2].lightning);
        assert_eq!(samples[2].description, "Thunderstorm");
    }

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let samples = sample_document().hourly_samples();
        let second = &samples[1];
        assert_eq!(second.temp_c, 0.0);
        assert_eq!(second.rain_mm, 0.0);
        assert_eq!(second.visibility_km, 10.0);
    }

    #[test]
    fn document_without_timelines_yields_no_samples() {
        let doc: TomorrowIoForecast =
            serde_json::from_value(serde_json::json!({"location": {}})).unwrap();
        assert!(doc.hourly_samples().is_empty());
    }
}
