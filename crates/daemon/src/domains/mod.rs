pub mod providers;

mod codes;
mod consolidate;
mod impact;
mod service;
mod slabs;
mod summary;

pub use codes::*;
pub use consolidate::*;
pub use impact::*;
pub use service::*;
pub use slabs::*;
pub use summary::*;

use std::collections::HashMap;

/// Most frequent string in `values`; ties resolve to the value seen first
pub(crate) fn most_frequent(values: &[String]) -> Option<&str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value.as_str()).or_default() += 1;
    }
    let best = counts.values().copied().max()?;
    values
        .iter()
        .map(String::as_str)
        .find(|&value| counts[value] == best)
}

/// Round to one decimal place for display values
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn most_frequent_picks_the_majority() {
        let values = vec![
            String::from("Cloudy"),
            String::from("Rain"),
            String::from("Rain"),
        ];
        assert_eq!(most_frequent(&values), Some("Rain"));
    }

    #[test]
    fn most_frequent_breaks_ties_by_first_seen() {
        let values = vec![
            String::from("Cloudy"),
            String::from("Rain"),
            String::from("Rain"),
            String::from("Cloudy"),
        ];
        assert_eq!(most_frequent(&values), Some("Cloudy"));
    }

    #[test]
    fn most_frequent_of_nothing_is_none() {
        assert_eq!(most_frequent(&[]), None);
    }

    #[test]
    fn rounding_to_tenths() {
        assert_eq!(round_to_tenth(2.349), 2.3);
        assert_eq!(round_to_tenth(2.35), 2.4);
        assert_eq!(round_to_tenth(0.25), 0.3);
    }
}
