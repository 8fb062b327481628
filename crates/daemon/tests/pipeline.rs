//! End-to-end pipeline tests over raw provider documents
//!
//! Each test feeds provider JSON through consolidation, slab aggregation,
//! selection, daily summary, and impact classification the same way the
//! forecast service does.

use daemon::providers::{OpenMeteoForecast, OpenWeatherForecast, ProviderSet, TomorrowIoForecast};
use daemon::{
    aggregate_slabs, classify_impact, consolidate_hours, group_by_day, select_slabs, summarize_day,
    ImpactLevel, Thresholds,
};
use time::macros::{date, datetime};

#[test]
fn rainy_morning_produces_a_moderate_daily_impact() {
    let json = r#"{
        "hourly": {
            "time": ["2025-07-17T09:00", "2025-07-17T10:00"],
            "temperature_2m": [24.0, 26.0],
            "precipitation": [2.0, 3.5],
            "weather_code": [61, 63],
            "wind_speed_10m": [10.0, 10.0],
            "precipitation_probability": [40.0, 60.0],
            "visibility": [8000.0, 8000.0]
        }
    }"#;
    let document: OpenMeteoForecast = serde_json::from_str(json).unwrap();
    let providers = ProviderSet {
        open_meteo: Some(document),
        ..ProviderSet::default()
    };

    let now = datetime!(2025-07-17 08:30 +5:30);
    let days = group_by_day(consolidate_hours(&providers, now));
    let hours = &days[&date!(2025 - 07 - 17)];
    assert_eq!(hours.len(), 2);

    let thresholds = Thresholds::default();
    let slabs = aggregate_slabs(hours);
    let selected = select_slabs(&slabs, &thresholds);
    let summary = summarize_day(date!(2025 - 07 - 17), hours, selected);
    let verdict = classify_impact(summary.total_rain_mm, &slabs, &thresholds);

    assert_eq!(summary.total_rain_mm, 5.5);
    assert_eq!(summary.max_pop_pct, 60);
    assert_eq!(summary.weather, "Moderate Rain");
    assert_eq!(summary.max_temp_c, Some(26.0));
    assert_eq!(summary.min_temp_c, Some(24.0));

    assert_eq!(summary.slabs.len(), 2);
    assert_eq!(summary.slabs[0].time_range, "08:30 AM to 10:30 AM");
    assert_eq!(summary.slabs[0].rain_mm, 2.0);
    assert_eq!(summary.slabs[0].rain_category(), "moderate rain");
    assert_eq!(summary.slabs[1].time_range, "10:30 AM to 12:30 PM");
    assert_eq!(summary.slabs[1].rain_mm, 3.5);
    assert_eq!(summary.slabs[1].rain_category(), "moderate rain");

    assert_eq!(verdict.level, ImpactLevel::Moderate);
    assert_eq!(
        verdict.status,
        "Proceed with caution, production may be impacted due to moderate rainfall."
    );
}

#[test]
fn lightning_hour_escalates_a_dry_day_to_high() {
    let json = r#"{
        "timelines": {
            "hourly": [
                {
                    "time": "2025-07-17T04:00:00Z",
                    "values": { "temperature": 24.0, "windSpeed": 2.0, "weatherCode": 1000 }
                },
                {
                    "time": "2025-07-17T05:00:00Z",
                    "values": {
                        "temperature": 25.0,
                        "windSpeed": 10.0,
                        "weatherCode": 8000,
                        "lightningStrikeCount": 2.0
                    }
                }
            ]
        }
    }"#;
    let document: TomorrowIoForecast = serde_json::from_str(json).unwrap();
    let providers = ProviderSet {
        tomorrow_io: Some(document),
        ..ProviderSet::default()
    };

    let now = datetime!(2025-07-17 08:30 +5:30);
    let days = group_by_day(consolidate_hours(&providers, now));
    let hours = &days[&date!(2025 - 07 - 17)];

    let thresholds = Thresholds::default();
    let slabs = aggregate_slabs(hours);
    let selected = select_slabs(&slabs, &thresholds);
    let summary = summarize_day(date!(2025 - 07 - 17), hours, selected);
    let verdict = classify_impact(summary.total_rain_mm, &slabs, &thresholds);

    // No slab clears the rainfall display threshold on a dry day
    assert!(summary.slabs.is_empty());
    assert_eq!(summary.total_rain_mm, 0.0);
    assert_eq!(summary.weather, "Sunny");

    // The hazard still counts: 10 m/s converts to 36 km/h
    assert_eq!(verdict.level, ImpactLevel::High);
    assert_eq!(
        verdict.status,
        "Blasting/open-pit operations likely impacted due to lightning. High winds also expected."
    );
}

#[test]
fn no_provider_data_yields_no_days_and_a_sentinel_summary() {
    let providers = ProviderSet::default();
    assert!(providers.is_empty());

    let now = datetime!(2025-07-17 08:30 +5:30);
    let days = group_by_day(consolidate_hours(&providers, now));
    assert!(days.is_empty());

    let summary = summarize_day(date!(2025 - 07 - 17), &[], Vec::new());
    assert_eq!(summary.max_temp_c, None);
    assert_eq!(summary.min_temp_c, None);
    assert_eq!(summary.total_rain_mm, 0.0);
    assert_eq!(summary.weather, "No Rain");
    assert!(summary.slabs.is_empty());
}

#[test]
fn providers_average_into_one_consolidated_hour() {
    // 1752739200 is 2025-07-17 08:00 UTC, 13:30 IST
    let open_weather_json = r#"{
        "hourly": [
            {
                "dt": 1752739200,
                "temp": 30.0,
                "pop": 0.5,
                "wind_speed": 5.0,
                "visibility": 6000,
                "rain": { "1h": 1.0 },
                "weather": [{ "id": 500, "description": "light rain" }]
            }
        ]
    }"#;
    let open_meteo_json = r#"{
        "hourly": {
            "time": ["2025-07-17T13:00"],
            "temperature_2m": [26.0],
            "precipitation": [3.0],
            "weather_code": [61],
            "wind_speed_10m": [10.0],
            "precipitation_probability": [70.0],
            "visibility": [4000.0]
        }
    }"#;
    let providers = ProviderSet {
        open_weather: Some(serde_json::from_str::<OpenWeatherForecast>(open_weather_json).unwrap()),
        open_meteo: Some(serde_json::from_str::<OpenMeteoForecast>(open_meteo_json).unwrap()),
        tomorrow_io: None,
    };

    let now = datetime!(2025-07-17 12:00 +5:30);
    let hours = consolidate_hours(&providers, now);
    assert_eq!(hours.len(), 1);
    let hour = &hours[0];
    assert_eq!(hour.stamp, datetime!(2025-07-17 13:00 +5:30));
    assert_eq!(hour.temp_c, 28.0);
    assert_eq!(hour.rain_mm, 2.0);
    assert_eq!(hour.pop_pct, 60.0);
    assert_eq!(hour.wind_kmh, 14.0);
    assert_eq!(hour.visibility_km, 5.0);
    // Tied descriptions resolve to the earlier provider's wording
    assert_eq!(hour.description, "light rain");
    assert!(!hour.lightning);
}

#[test]
fn a_fully_wet_day_caps_the_displayed_slabs() {
    let times: Vec<String> = (0..24).map(|h| format!("2025-07-17T{h:02}:00")).collect();
    let raw = serde_json::json!({
        "hourly": {
            "time": times,
            "temperature_2m": vec![25.0; 24],
            "precipitation": vec![1.0; 24],
            "weather_code": vec![61; 24],
            "wind_speed_10m": vec![10.0; 24],
            "precipitation_probability": vec![50.0; 24],
            "visibility": vec![9000.0; 24]
        }
    });
    let providers = ProviderSet {
        open_meteo: Some(serde_json::from_value(raw).unwrap()),
        ..ProviderSet::default()
    };

    let now = datetime!(2025-07-17 00:30 +5:30);
    let days = group_by_day(consolidate_hours(&providers, now));
    let hours = &days[&date!(2025 - 07 - 17)];
    assert_eq!(hours.len(), 24);

    let thresholds = Thresholds::default();
    let slabs = aggregate_slabs(hours);
    assert_eq!(slabs.len(), 12);
    assert!(slabs.iter().all(|slab| slab.rain_mm == 2.0));

    let selected = select_slabs(&slabs, &thresholds);
    assert_eq!(selected.len(), 6);
    // Equal scores fall back to the earliest windows, kept in time order
    let indices: Vec<usize> = selected.iter().map(|slab| slab.window_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);

    let summary = summarize_day(date!(2025 - 07 - 17), hours, selected);
    let verdict = classify_impact(summary.total_rain_mm, &slabs, &thresholds);
    assert_eq!(summary.total_rain_mm, 24.0);
    assert_eq!(summary.weather, "Heavy Rain");
    assert_eq!(verdict.level, ImpactLevel::High);
}
