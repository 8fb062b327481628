//! Minecast Core Library
//!
//! Shared functionality for the minecast services:
//! - Configuration discovery and loading (XDG-compliant)
//! - Common constants and tunable defaults

mod config;

pub use config::{find_config_file, load_config, ConfigSource};

use time::{macros::offset, UtcOffset};

/// Application name used for XDG directories
pub const APP_NAME: &str = "minecast";

/// Timezone every forecast is consolidated in (IST, UTC+05:30)
pub const IST: UtcOffset = offset!(+5:30);

/// Default fetch interval in seconds (1 hour)
pub const DEFAULT_FETCH_INTERVAL: u64 = 3600;

/// Default per-request timeout for provider APIs, in seconds
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 10;

/// Default lifetime of a cached provider response, in seconds
pub const DEFAULT_CACHE_TTL: u64 = 1800;

/// Wind speed at or above which a slab is flagged for high wind, in km/h
pub const WIND_ALERT_THRESHOLD_KMH: f64 = 30.0;

/// Visibility at or below which a slab is flagged for low visibility, in km
pub const VISIBILITY_ALERT_THRESHOLD_KM: f64 = 1.0;

/// Minimum summed rainfall for a 2-hour slab to be shown, in mm
pub const MIN_RAINFALL_FOR_SLAB_DISPLAY_MM: f64 = 0.6;

/// Maximum number of precipitation slabs shown per day
pub const MAX_SLABS_TO_SHOW: usize = 6;
