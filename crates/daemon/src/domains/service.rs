//! Per-site forecast assembly
//!
//! Fetches every provider document for a site, consolidates the hourly
//! samples, and derives the per-day summaries and impact verdicts the
//! report renders. Provider failures degrade to fewer contributing
//! readings; only the loss of every hourly provider marks a site
//! unavailable.

use std::collections::BTreeMap;
use std::fmt;

use slog::{debug, error, info, warn, Logger};
use time::{Date, OffsetDateTime};

use super::consolidate::{consolidate_hours, group_by_day, HourRecord};
use super::impact::{classify_impact, ImpactVerdict};
use super::providers::{
    accu_weather, open_meteo, open_weather, tomorrow_io, AccuWeatherDaily, OpenMeteoForecast,
    OpenWeatherForecast, ProviderSet, TomorrowIoForecast,
};
use super::slabs::{aggregate_slabs, select_slabs};
use super::summary::{summarize_day, DaySummary};
use crate::sites::{Site, Thresholds};
use crate::utils::{JsonFetcher, ProviderKeys};

/// Which day of the two-day horizon a forecast covers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayKind {
    Today,
    Tomorrow,
}

impl fmt::Display for DayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayKind::Today => write!(f, "Today"),
            DayKind::Tomorrow => write!(f, "Tomorrow"),
        }
    }
}

/// A day's summary plus its production impact verdict
#[derive(Clone, Debug)]
pub struct DayReport {
    pub summary: DaySummary,
    pub verdict: ImpactVerdict,
}

#[derive(Clone, Debug)]
pub struct DayForecast {
    pub kind: DayKind,
    pub date: Date,
    /// None when no hours were consolidated for this date
    pub report: Option<DayReport>,
}

/// What the report renders for one site
#[derive(Clone, Debug)]
pub struct SiteForecast {
    pub site_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub outcome: ForecastOutcome,
}

#[derive(Clone, Debug)]
pub enum ForecastOutcome {
    /// Every hourly provider failed; distinct from a valid dry forecast
    Unavailable,
    Days(Vec<DayForecast>),
}

pub struct ForecastService {
    logger: Logger,
    fetcher: JsonFetcher,
    keys: ProviderKeys,
    thresholds: Thresholds,
}

impl ForecastService {
    pub fn new(
        logger: Logger,
        fetcher: JsonFetcher,
        keys: ProviderKeys,
        thresholds: Thresholds,
    ) -> Self {
        ForecastService {
            logger,
            fetcher,
            keys,
            thresholds,
        }
    }

    /// Fetch, consolidate, and summarize the forecast for one site
    pub async fn site_forecast(&self, site: &Site, now_ist: OffsetDateTime) -> SiteForecast {
        let providers = self.fetch_providers(site).await;
        if providers.is_empty() {
            warn!(self.logger, "{}: no hourly provider returned data", site.name);
            return SiteForecast {
                site_name: site.name.clone(),
                latitude: site.latitude,
                longitude: site.longitude,
                outcome: ForecastOutcome::Unavailable,
            };
        }

        let today = now_ist.date();
        self.log_daily_outlook(site, today).await;

        let mut days_by_date = group_by_day(consolidate_hours(&providers, now_ist));
        let mut days = vec![self.day_forecast(DayKind::Today, today, &mut days_by_date)];
        if let Some(tomorrow) = today.next_day() {
            days.push(self.day_forecast(DayKind::Tomorrow, tomorrow, &mut days_by_date));
        }

        for day in &days {
            if let Some(report) = &day.report {
                info!(
                    self.logger,
                    "{} - {}: {}, total rain {:.1} mm, impact {}",
                    site.name,
                    day.kind,
                    report.summary.weather,
                    report.summary.total_rain_mm,
                    report.verdict.level
                );
            }
        }

        SiteForecast {
            site_name: site.name.clone(),
            latitude: site.latitude,
            longitude: site.longitude,
            outcome: ForecastOutcome::Days(days),
        }
    }

    fn day_forecast(
        &self,
        kind: DayKind,
        date: Date,
        days_by_date: &mut BTreeMap<Date, Vec<HourRecord>>,
    ) -> DayForecast {
        let report = days_by_date.remove(&date).map(|hours| {
            let slabs = aggregate_slabs(&hours);
            let selected = select_slabs(&slabs, &self.thresholds);
            let summary = summarize_day(date, &hours, selected);
            // Hazards count even in windows filtered from display
            let verdict = classify_impact(summary.total_rain_mm, &slabs, &self.thresholds);
            DayReport { summary, verdict }
        });
        if report.is_none() {
            info!(self.logger, "no consolidated hours for {}", date);
        }
        DayForecast { kind, date, report }
    }

    async fn fetch_providers(&self, site: &Site) -> ProviderSet {
        let (open_weather, open_meteo, tomorrow_io) = tokio::join!(
            self.fetch_open_weather(site),
            self.fetch_open_meteo(site),
            self.fetch_tomorrow_io(site),
        );
        ProviderSet {
            open_weather,
            open_meteo,
            tomorrow_io,
        }
    }

    async fn fetch_open_weather(&self, site: &Site) -> Option<OpenWeatherForecast> {
        let key = match self.keys.open_weather.as_deref() {
            Some(key) => key,
            None => {
                info!(self.logger, "OpenWeatherMap API key not set, skipping for {}", site.name);
                return None;
            }
        };
        let url = open_weather::forecast_url(site.latitude, site.longitude, key);
        match self.fetcher.fetch_json(&url).await {
            Ok(document) => Some(document),
            Err(e) => {
                error!(
                    self.logger,
                    "OpenWeatherMap One Call API 3.0 error for ({}, {}): {}",
                    site.latitude,
                    site.longitude,
                    e
                );
                None
            }
        }
    }

    async fn fetch_open_meteo(&self, site: &Site) -> Option<OpenMeteoForecast> {
        let url = open_meteo::forecast_url(site.latitude, site.longitude);
        match self.fetcher.fetch_json(&url).await {
            Ok(document) => Some(document),
            Err(e) => {
                error!(
                    self.logger,
                    "Open-Meteo API error for ({}, {}): {}",
                    site.latitude,
                    site.longitude,
                    e
                );
                None
            }
        }
    }

    async fn fetch_tomorrow_io(&self, site: &Site) -> Option<TomorrowIoForecast> {
        let key = match self.keys.tomorrow_io.as_deref() {
            Some(key) => key,
            None => {
                info!(self.logger, "Tomorrow.io API key not set, skipping for {}", site.name);
                return None;
            }
        };
        let url = tomorrow_io::forecast_url(site.latitude, site.longitude, key);
        match self.fetcher.fetch_json(&url).await {
            Ok(document) => Some(document),
            Err(e) => {
                error!(
                    self.logger,
                    "Tomorrow.io API error for ({}, {}): {}",
                    site.latitude,
                    site.longitude,
                    e
                );
                None
            }
        }
    }

    /// AccuWeather's daily outlook backs no report section yet; it is
    /// fetched when configured and logged for cross-checking the
    /// consolidated numbers.
    async fn log_daily_outlook(&self, site: &Site, today: Date) {
        let key = match self.keys.accu_weather.as_deref() {
            Some(key) => key,
            None => return,
        };
        let location_key = match site.accuweather_location_key.as_deref() {
            Some(location_key) => location_key,
            None => return,
        };

        let url = accu_weather::daily_forecast_url(location_key, key);
        match self.fetcher.fetch_json::<AccuWeatherDaily>(&url).await {
            Ok(document) => {
                for outlook in document.daily_outlooks(today) {
                    debug!(
                        self.logger,
                        "AccuWeather outlook for {} on {}: min {} C, max {} C, rain {} mm, {}",
                        site.name,
                        outlook.date,
                        outlook.min_temp_c,
                        outlook.max_temp_c,
                        outlook.total_rain_mm,
                        outlook.description
                    );
                }
            }
            Err(e) => {
                warn!(
                    self.logger,
                    "AccuWeather daily forecast API error for location key {}: {}",
                    location_key,
                    e
                );
            }
        }
    }
}
