use minecast_core::{
    load_config, ConfigSource, MAX_SLABS_TO_SHOW, MIN_RAINFALL_FOR_SLAB_DISPLAY_MM,
    VISIBILITY_ALERT_THRESHOLD_KM, WIND_ALERT_THRESHOLD_KMH,
};

/// A fixed mine site the daemon reports on
#[derive(Clone, Debug, serde::Deserialize)]
pub struct Site {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// AccuWeather location key, set when the daily outlook is wanted for this site
    #[serde(default)]
    pub accuweather_location_key: Option<String>,
}

/// Tunable alert and display thresholds, constant for the duration of a run
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Wind speed at or above which a slab is flagged, km/h
    pub wind_alert_kmh: f64,
    /// Visibility at or below which a slab is flagged, km
    pub visibility_alert_km: f64,
    /// Minimum summed rainfall for a slab to be displayed, mm
    pub min_slab_rain_mm: f64,
    /// Maximum number of slabs displayed per day
    pub max_slabs: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            wind_alert_kmh: WIND_ALERT_THRESHOLD_KMH,
            visibility_alert_km: VISIBILITY_ALERT_THRESHOLD_KM,
            min_slab_rain_mm: MIN_RAINFALL_FOR_SLAB_DISPLAY_MM,
            max_slabs: MAX_SLABS_TO_SHOW,
        }
    }
}

/// The `[[sites]]` and `[thresholds]` sections of the daemon config file
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub sites: Vec<Site>,
    pub thresholds: Thresholds,
}

/// Load the site list and thresholds from the daemon's config file
pub fn load_site_config(source: &ConfigSource) -> anyhow::Result<SiteConfig> {
    load_config(source)
}
