//! Production impact classification
//!
//! A small rule engine mapping a day's total rainfall and per-window
//! hazards to a three-level severity with a human-readable rationale.
//! Severity only ever escalates within one evaluation.

use std::fmt;

use super::slabs::Slab;
use crate::sites::Thresholds;

/// Operational severity, ordered from least to most disruptive
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImpactLevel {
    Low,
    Moderate,
    High,
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactLevel::Low => write!(f, "Low"),
            ImpactLevel::Moderate => write!(f, "Moderate"),
            ImpactLevel::High => write!(f, "High"),
        }
    }
}

/// Severity plus its rationale
#[derive(Clone, Debug, PartialEq)]
pub struct ImpactVerdict {
    pub level: ImpactLevel,
    pub status: String,
}

/// Classify production impact from the day's total rainfall and the full
/// set of per-window aggregates, displayed or not. A hazard in a window
/// that was filtered from display still counts. The rationale never names
/// the same hazard twice.
pub fn classify_impact(
    total_rain_mm: f64,
    slabs: &[Slab],
    thresholds: &Thresholds,
) -> ImpactVerdict {
    let mut level = ImpactLevel::Low;
    let mut status = String::from("Normal operations, minor impact possible");

    if total_rain_mm >= 15.0 {
        level = ImpactLevel::High;
        status = String::from("Production may be significantly impacted due to heavy rainfall.");
    } else if total_rain_mm >= 5.0 {
        level = ImpactLevel::Moderate;
        status = String::from(
            "Proceed with caution, production may be impacted due to moderate rainfall.",
        );
    }

    let lightning = slabs.iter().any(|slab| slab.lightning);
    let high_wind = slabs
        .iter()
        .any(|slab| slab.wind_kmh >= thresholds.wind_alert_kmh);
    let low_visibility = slabs
        .iter()
        .any(|slab| slab.visibility_km <= thresholds.visibility_alert_km);

    if lightning {
        if level != ImpactLevel::High {
            level = ImpactLevel::High;
            status = String::from("Blasting/open-pit operations likely impacted due to lightning.");
        } else {
            status.push_str(" Additionally, lightning expected.");
        }
    }

    if high_wind {
        if level == ImpactLevel::Low {
            level = ImpactLevel::Moderate;
            status =
                String::from("Caution advised due to high winds, potential dust/equipment issues.");
        } else if !status.to_lowercase().contains("wind") {
            status.push_str(" High winds also expected.");
        }
    }

    if low_visibility {
        if level == ImpactLevel::Low {
            level = ImpactLevel::Moderate;
            status =
                String::from("Caution advised due to low visibility, impacting vehicle movement.");
        } else if !status.to_lowercase().contains("visibility") {
            status.push_str(" Low visibility also expected.");
        }
    }

    ImpactVerdict { level, status }
}
