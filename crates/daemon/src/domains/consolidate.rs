//! Cross-provider hourly consolidation
//!
//! Buckets every provider sample into hour-truncated IST keys inside the
//! retention window, then reduces each bucket to a single record: numeric
//! fields average across providers, the description goes to the most
//! frequent value and lightning flags combine with OR.

use std::collections::BTreeMap;

use time::{Date, Duration, OffsetDateTime};

use super::providers::{HourlySample, ProviderSet};

/// Hours kept before the current hour
pub const LOOKBACK_HOURS: i64 = 1;

/// Hours kept past the current hour
pub const HORIZON_HOURS: i64 = 48;

/// One consolidated forecast hour for one site
#[derive(Clone, Debug, PartialEq)]
pub struct HourRecord {
    /// Hour-truncated IST timestamp, unique per record
    pub stamp: OffsetDateTime,
    pub temp_c: f64,
    pub rain_mm: f64,
    pub pop_pct: f64,
    pub wind_kmh: f64,
    pub visibility_km: f64,
    pub description: String,
    pub lightning: bool,
}

#[derive(Debug, Default)]
struct HourBucket {
    temps: Vec<f64>,
    rains: Vec<f64>,
    pops: Vec<f64>,
    winds: Vec<f64>,
    visibilities: Vec<f64>,
    descriptions: Vec<String>,
    lightning: bool,
}

impl HourBucket {
    fn push(&mut self, sample: HourlySample) {
        self.temps.push(sample.temp_c);
        self.rains.push(sample.rain_mm);
        self.pops.push(sample.pop_pct);
        self.winds.push(sample.wind_kmh);
        self.visibilities.push(sample.visibility_km);
        self.descriptions.push(sample.description);
        self.lightning = self.lightning || sample.lightning;
    }

    fn into_record(self, stamp: OffsetDateTime) -> HourRecord {
        let description = super::most_frequent(&self.descriptions)
            .map(str::to_string)
            .unwrap_or_else(|| String::from("N/A"));
        HourRecord {
            stamp,
            temp_c: mean_or(&self.temps, 0.0),
            rain_mm: mean_or(&self.rains, 0.0),
            pop_pct: mean_or(&self.pops, 0.0),
            wind_kmh: mean_or(&self.winds, 0.0),
            visibility_km: mean_or(&self.visibilities, 10.0),
            description,
            lightning: self.lightning,
        }
    }
}

/// Merge every provider's samples into one chronological record per hour
pub fn consolidate_hours(providers: &ProviderSet, now_ist: OffsetDateTime) -> Vec<HourRecord> {
    consolidate_samples(providers.hourly_samples(), now_ist)
}

/// Core of [`consolidate_hours`]. Samples whose hour falls more than
/// [`LOOKBACK_HOURS`] before or [`HORIZON_HOURS`] after the current hour
/// are dropped; both window edges are inclusive.
pub fn consolidate_samples(
    samples: Vec<HourlySample>,
    now_ist: OffsetDateTime,
) -> Vec<HourRecord> {
    let current_hour = truncate_to_hour(now_ist);
    let earliest = current_hour - Duration::hours(LOOKBACK_HOURS);
    let latest = current_hour + Duration::hours(HORIZON_HOURS);

    let mut buckets: BTreeMap<OffsetDateTime, HourBucket> = BTreeMap::new();
    for sample in samples {
        let hour_key = truncate_to_hour(sample.stamp);
        if hour_key < earliest || hour_key > latest {
            continue;
        }
        buckets.entry(hour_key).or_default().push(sample);
    }

    buckets
        .into_iter()
        .map(|(stamp, bucket)| bucket.into_record(stamp))
        .collect()
}

/// Group consolidated hours by IST calendar date, preserving hour order
pub fn group_by_day(hours: Vec<HourRecord>) -> BTreeMap<Date, Vec<HourRecord>> {
    let mut days: BTreeMap<Date, Vec<HourRecord>> = BTreeMap::new();
    for hour in hours {
        days.entry(hour.stamp.date()).or_default().push(hour);
    }
    days
}

fn truncate_to_hour(stamp: OffsetDateTime) -> OffsetDateTime {
    stamp
        .replace_minute(0)
        .and_then(|s| s.replace_second(0))
        .and_then(|s| s.replace_nanosecond(0))
        .unwrap_or(stamp)
}

fn mean_or(values: &[f64], default: f64) -> f64 {
    if values.is_empty() {
        default
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
