//! Provider API documents and their normalization into hourly samples
//!
//! Each provider has a serde document type mirroring the relevant slice of
//! its JSON response plus an adapter producing `HourlySample`s in the shared
//! vocabulary: IST timestamps, degrees Celsius, millimetres, percent
//! probabilities, km/h wind, km visibility.

pub mod accu_weather;
pub mod open_meteo;
pub mod open_weather;
pub mod tomorrow_io;

pub use accu_weather::{AccuWeatherDaily, DailyOutlook};
pub use open_meteo::OpenMeteoForecast;
pub use open_weather::OpenWeatherForecast;
pub use tomorrow_io::TomorrowIoForecast;

use time::OffsetDateTime;

/// One provider's contribution for one forecast hour, fully normalized
#[derive(Clone, Debug)]
pub struct HourlySample {
    /// Reading time in IST, not yet truncated to the hour
    pub stamp: OffsetDateTime,
    pub temp_c: f64,
    pub rain_mm: f64,
    pub pop_pct: f64,
    pub wind_kmh: f64,
    pub visibility_km: f64,
    pub description: String,
    pub lightning: bool,
}

/// The hourly provider documents fetched for one site; any of them may be
/// absent when that provider was unavailable
#[derive(Debug, Default)]
pub struct ProviderSet {
    pub open_weather: Option<OpenWeatherForecast>,
    pub open_meteo: Option<OpenMeteoForecast>,
    pub tomorrow_io: Option<TomorrowIoForecast>,
}

impl ProviderSet {
    pub fn is_empty(&self) -> bool {
        self.open_weather.is_none() && self.open_meteo.is_none() && self.tomorrow_io.is_none()
    }

    /// All providers' samples in fixed provider order. Description ties in
    /// later consolidation resolve in favor of earlier providers.
    pub fn hourly_samples(&self) -> Vec<HourlySample> {
        let mut samples = Vec::new();
        if let Some(doc) = &self.open_weather {
            samples.extend(doc.hourly_samples());
        }
        if let Some(doc) = &self.open_meteo {
            samples.extend(doc.hourly_samples());
        }
        if let Some(doc) = &self.tomorrow_io {
            samples.extend(doc.hourly_samples());
        }
        samples
    }
}
