//! AccuWeather 5-day daily forecast
//!
//! Daily outlooks only; they never feed hourly consolidation and are
//! surfaced through debug logging as a cross-check against the hourly
//! providers. Requires both an API key and a per-site location key.

use minecast_core::IST;
use serde::Deserialize;
use time::{Date, OffsetDateTime};

pub fn daily_forecast_url(location_key: &str, api_key: &str) -> String {
    format!(
        "https://dataservice.accuweather.com/forecasts/v1/daily/5day/{location_key}\
         ?apikey={api_key}&details=true&metric=true"
    )
}

#[derive(Debug, Deserialize)]
pub struct AccuWeatherDaily {
    #[serde(rename = "DailyForecasts", default)]
    pub daily_forecasts: Vec<AccuWeatherDay>,
}

#[derive(Debug, Deserialize)]
pub struct AccuWeatherDay {
    /// Unix timestamp of the forecast day, UTC
    #[serde(rename = "EpochDate")]
    pub epoch_date: i64,
    #[serde(rename = "Temperature")]
    pub temperature: TemperatureRange,
    #[serde(rename = "Day")]
    pub day: DayPart,
}

#[derive(Debug, Deserialize)]
pub struct TemperatureRange {
    #[serde(rename = "Minimum")]
    pub minimum: MetricValue,
    #[serde(rename = "Maximum")]
    pub maximum: MetricValue,
}

#[derive(Debug, Deserialize)]
pub struct DayPart {
    #[serde(rename = "TotalLiquid")]
    pub total_liquid: MetricValue,
    #[serde(rename = "IconPhrase")]
    pub icon_phrase: String,
}

#[derive(Debug, Deserialize)]
pub struct MetricValue {
    #[serde(rename = "Value")]
    pub value: f64,
}

/// One day of the AccuWeather outlook, reduced to the fields worth logging
#[derive(Clone, Debug, PartialEq)]
pub struct DailyOutlook {
    pub date: Date,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub total_rain_mm: f64,
    pub description: String,
}

impl AccuWeatherDaily {
    /// Outlooks for today and tomorrow relative to `today` in IST; other
    /// days of the 5-day response are dropped
    pub fn daily_outlooks(&self, today: Date) -> Vec<DailyOutlook> {
        let mut outlooks = Vec::new();
        for entry in &self.daily_forecasts {
            let date = match OffsetDateTime::from_unix_timestamp(entry.epoch_date) {
                Ok(utc) => utc.to_offset(IST).date(),
                Err(_) => continue,
            };

            let in_window = date == today || Some(date) == today.next_day();
            if !in_window {
                continue;
            }

            outlooks.push(DailyOutlook {
                date,
                min_temp_c: entry.temperature.minimum.value,
                max_temp_c: entry.temperature.maximum.value,
                total_rain_mm: entry.day.total_liquid.value,
                description: entry.day.icon_phrase.clone(),
            });
        }
        outlooks
    }
}
