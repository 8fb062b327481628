//! Daily summary built from one day's consolidated hours

use time::Date;

use super::consolidate::HourRecord;
use super::slabs::Slab;

/// One day's consolidated forecast for a site
#[derive(Clone, Debug, PartialEq)]
pub struct DaySummary {
    pub date: Date,
    /// None when the day has no forecast hours
    pub max_temp_c: Option<f64>,
    pub min_temp_c: Option<f64>,
    /// Sum of every hour's rainfall, including hours outside displayed slabs
    pub total_rain_mm: f64,
    /// Maximum single-hour precipitation probability, percent
    pub max_pop_pct: i64,
    /// Headline weather description
    pub weather: String,
    /// Selected display slabs in chronological order
    pub slabs: Vec<Slab>,
}

/// Reduce one day's hours to a [`DaySummary`], attaching the already
/// selected display slabs. Tolerates an empty day.
pub fn summarize_day(date: Date, hours: &[HourRecord], slabs: Vec<Slab>) -> DaySummary {
    let max_temp_c = hours
        .iter()
        .map(|hour| hour.temp_c)
        .reduce(f64::max)
        .map(super::round_to_tenth);
    let min_temp_c = hours
        .iter()
        .map(|hour| hour.temp_c)
        .reduce(f64::min)
        .map(super::round_to_tenth);
    let total_rain_mm = super::round_to_tenth(hours.iter().map(|hour| hour.rain_mm).sum());
    let max_pop_pct = hours
        .iter()
        .map(|hour| hour.pop_pct)
        .reduce(f64::max)
        .map(|pop| pop.round() as i64)
        .unwrap_or(0);

    let descriptions: Vec<String> = hours.iter().map(|hour| hour.description.clone()).collect();
    let most_common = super::most_frequent(&descriptions).unwrap_or("N/A");
    let weather = daily_rain_category(total_rain_mm, most_common).to_string();

    DaySummary {
        date,
        max_temp_c,
        min_temp_c,
        total_rain_mm,
        max_pop_pct,
        weather,
        slabs,
    }
}

/// Whole-day rainfall category. A dry day falls back to a label inferred
/// from the day's most frequent hourly description, checked against
/// keywords in fixed priority order.
pub fn daily_rain_category(mm: f64, most_common_description: &str) -> &'static str {
    if mm >= 25.0 {
        "Very Heavy Rain & Storm"
    } else if mm >= 15.0 {
        "Heavy Rain"
    } else if mm >= 5.0 {
        "Moderate Rain"
    } else if mm >= 1.0 {
        "Light Rain"
    } else if mm > 0.0 {
        "Drizzle"
    } else {
        let lowered = most_common_description.to_lowercase();
        if lowered.contains("clear") || lowered.contains("sun") {
            "Sunny"
        } else if lowered.contains("cloud") || lowered.contains("overcast") {
            "Cloudy"
        } else if lowered.contains("fog") || lowered.contains("mist") {
            "Foggy"
        } else if lowered.contains("thunderstorm") || lowered.contains("storm") {
            "Thunderstorm"
        } else if lowered.contains("rain") {
            "Rainy"
        } else {
            "No Rain"
        }
    }
}
