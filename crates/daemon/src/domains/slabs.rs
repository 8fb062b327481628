//! Two-hour precipitation slabs
//!
//! Twelve fixed windows partition the 24 IST clock hours. Each populated
//! window aggregates its contributing hours (rain sums, the rest average),
//! and a selector keeps the highest-scoring rainy windows for display.

use std::collections::HashSet;

use super::codes::mentions_lightning;
use super::consolidate::HourRecord;
use crate::sites::Thresholds;

/// One fixed 2-hour display window
#[derive(Clone, Copy, Debug)]
pub struct SlabWindow {
    /// First clock hour the window claims; it also claims `start_hour + 1`
    pub start_hour: u8,
    pub label: &'static str,
}

/// The canonical window ordering. The last window is labeled as running
/// into the next day but only ever collects hours 22 and 23 of the day
/// being summarized.
pub const SLAB_WINDOWS: [SlabWindow; 12] = [
    SlabWindow { start_hour: 0, label: "12:30 AM to 02:30 AM" },
    SlabWindow { start_hour: 2, label: "02:30 AM to 04:30 AM" },
    SlabWindow { start_hour: 4, label: "04:30 AM to 06:30 AM" },
    SlabWindow { start_hour: 6, label: "06:30 AM to 08:30 AM" },
    SlabWindow { start_hour: 8, label: "08:30 AM to 10:30 AM" },
    SlabWindow { start_hour: 10, label: "10:30 AM to 12:30 PM" },
    SlabWindow { start_hour: 12, label: "12:30 PM to 02:30 PM" },
    SlabWindow { start_hour: 14, label: "02:30 PM to 04:30 PM" },
    SlabWindow { start_hour: 16, label: "04:30 PM to 06:30 PM" },
    SlabWindow { start_hour: 18, label: "06:30 PM to 08:30 PM" },
    SlabWindow { start_hour: 20, label: "08:30 PM to 10:30 PM" },
    SlabWindow { start_hour: 22, label: "10:30 PM to 12:30 AM (Next Day)" },
];

/// Index of the window claiming the given clock hour (0 through 23)
pub fn window_index_for_hour(hour: u8) -> usize {
    usize::from(hour / 2)
}

/// Aggregate of one populated window for one site and day
#[derive(Clone, Debug, PartialEq)]
pub struct Slab {
    /// Position in [`SLAB_WINDOWS`]
    pub window_index: usize,
    pub time_range: &'static str,
    /// Sum of contributing hours' rainfall, mm
    pub rain_mm: f64,
    /// Mean precipitation probability, percent
    pub pop_pct: f64,
    /// Mean wind speed, km/h
    pub wind_kmh: f64,
    /// Mean visibility, km
    pub visibility_km: f64,
    /// Most frequent contributing description, first seen wins ties
    pub description: String,
    pub lightning: bool,
}

impl Slab {
    /// Ranking score blending rainfall depth with forecast confidence
    pub fn score(&self) -> f64 {
        self.rain_mm + self.pop_pct / 100.0
    }

    /// Rainfall category from the summed 2-hour depth
    pub fn rain_category(&self) -> &'static str {
        slab_rain_category(self.rain_mm)
    }
}

/// Aggregate one day's hours into per-window slabs in canonical window
/// order. Windows with no contributing hour are omitted. Lightning is set
/// when any contributing hour carries the flag or a thunder/lightning
/// mention in its description.
pub fn aggregate_slabs(hours: &[HourRecord]) -> Vec<Slab> {
    let mut slabs = Vec::new();
    for (window_index, window) in SLAB_WINDOWS.iter().enumerate() {
        let contributing: Vec<&HourRecord> = hours
            .iter()
            .filter(|hour| window_index_for_hour(hour.stamp.hour()) == window_index)
            .collect();
        if contributing.is_empty() {
            continue;
        }

        let count = contributing.len() as f64;
        let descriptions: Vec<String> = contributing
            .iter()
            .map(|hour| hour.description.clone())
            .collect();
        let lightning = contributing.iter().any(|hour| hour.lightning)
            || descriptions.iter().any(|desc| mentions_lightning(desc));
        let description = super::most_frequent(&descriptions)
            .map(str::to_string)
            .unwrap_or_else(|| String::from("N/A"));
        slabs.push(Slab {
            window_index,
            time_range: window.label,
            rain_mm: contributing.iter().map(|hour| hour.rain_mm).sum(),
            pop_pct: contributing.iter().map(|hour| hour.pop_pct).sum::<f64>() / count,
            wind_kmh: contributing.iter().map(|hour| hour.wind_kmh).sum::<f64>() / count,
            visibility_km: contributing
                .iter()
                .map(|hour| hour.visibility_km)
                .sum::<f64>()
                / count,
            description,
            lightning,
        });
    }
    slabs
}

/// Rainfall category over a 2-hour accumulation. Breakpoints are tighter
/// than the whole-day ones since the depth accrues over two hours only.
pub fn slab_rain_category(mm: f64) -> &'static str {
    if mm >= 8.0 {
        "very heavy rain (torrential)"
    } else if mm >= 5.0 {
        "heavy rain"
    } else if mm >= 1.5 {
        "moderate rain"
    } else if mm >= 0.3 {
        "light rain"
    } else if mm > 0.0 {
        "drizzle"
    } else {
        "no rain"
    }
}

/// Keep the highest-scoring windows whose summed rainfall clears the
/// display threshold, deduplicated by label and capped, then restored to
/// chronological order. Score ties resolve to the earlier window.
pub fn select_slabs(slabs: &[Slab], thresholds: &Thresholds) -> Vec<Slab> {
    let mut candidates: Vec<Slab> = slabs
        .iter()
        .filter(|slab| slab.rain_mm >= thresholds.min_slab_rain_mm)
        .cloned()
        .collect();
    candidates.sort_by(|a, b| {
        b.score()
            .total_cmp(&a.score())
            .then_with(|| a.window_index.cmp(&b.window_index))
    });

    let mut selected: Vec<Slab> = Vec::new();
    let mut seen_labels: HashSet<&str> = HashSet::new();
    for slab in candidates {
        if !seen_labels.insert(slab.time_range) {
            continue;
        }
        selected.push(slab);
        if selected.len() >= thresholds.max_slabs {
            break;
        }
    }

    selected.sort_by_key(|slab| slab.window_index);
    selected
}
