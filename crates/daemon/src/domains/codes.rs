//! Provider weather-code vocabularies
//!
//! Each hourly provider reports conditions in its own numeric vocabulary;
//! everything downstream works with the text descriptions produced here.

/// Maps an Open-Meteo WMO weather code to a human-readable description
pub fn wmo_description(code: i64) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Drizzle: Light",
        53 => "Drizzle: Moderate",
        55 => "Drizzle: Dense",
        56 => "Freezing Drizzle: Light",
        57 => "Freezing Drizzle: Dense",
        61 => "Rain: Light",
        63 => "Rain: Moderate",
        65 => "Rain: Heavy",
        66 => "Freezing Rain: Light",
        67 => "Freezing Rain: Heavy",
        71 => "Snow fall: Slight",
        73 => "Snow fall: Moderate",
        75 => "Snow fall: Heavy",
        77 => "Snow grains",
        80 => "Rain showers: Slight",
        81 => "Rain showers: Moderate",
        82 => "Rain showers: Violent",
        85 => "Snow showers: Slight",
        86 => "Snow showers: Heavy",
        95 => "Thunderstorm: Slight or moderate",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown Open-Meteo code",
    }
}

/// Maps a Tomorrow.io weather code to a human-readable description
pub fn tomorrow_io_description(code: i64) -> &'static str {
    match code {
        0 => "Unknown",
        1000 => "Clear, Sunny",
        1001 => "Cloudy",
        1100 => "Mostly Clear",
        1101 => "Partly Cloudy",
        1102 => "Mostly Cloudy",
        2000 => "Fog",
        2100 => "Light Fog",
        3000 => "Light Wind",
        3001 => "Wind",
        3002 => "Strong Wind",
        4000 => "Drizzle",
        4001 => "Rain",
        4200 => "Light Rain",
        4201 => "Heavy Rain",
        5000 => "Light Snow",
        5001 => "Snow",
        5100 => "Heavy Snow",
        5101 => "Freezing Drizzle",
        6000 => "Freezing Drizzle",
        6001 => "Freezing Rain",
        6200 => "Light Freezing Rain",
        6201 => "Heavy Freezing Rain",
        7000 => "Light Ice Pellets",
        7001 => "Ice Pellets",
        7100 => "Heavy Ice Pellets",
        8000 => "Thunderstorm",
        _ => "Unknown Tomorrow.io code",
    }
}

/// OpenWeatherMap condition ids 2xx are the thunderstorm group
pub fn is_open_weather_thunder(condition_id: i64) -> bool {
    (200..300).contains(&condition_id)
}

/// WMO codes 95/96/99 are thunderstorm conditions
pub fn is_wmo_thunder(code: i64) -> bool {
    matches!(code, 95 | 96 | 99)
}

/// Tomorrow.io code 8000 is its only thunderstorm condition
pub fn is_tomorrow_io_thunder(code: i64) -> bool {
    code == 8000
}

/// Case-insensitive check for thunder/lightning wording in a description
pub fn mentions_lightning(description: &str) -> bool {
    let lowered = description.to_lowercase();
    lowered.contains("thunder") || lowered.contains("lightning")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_wmo_codes_map_to_descriptions() {
        assert_eq!(wmo_description(0), "Clear sky");
        assert_eq!(wmo_description(63), "Rain: Moderate");
        assert_eq!(wmo_description(95), "Thunderstorm: Slight or moderate");
    }

    #[test]
    fn unknown_codes_get_literal_markers() {
        assert_eq!(wmo_description(42), "Unknown Open-Meteo code");
        assert_eq!(tomorrow_io_description(4100), "Unknown Tomorrow.io code");
    }

    #[test]
    fn known_tomorrow_io_codes_map_to_descriptions() {
        assert_eq!(tomorrow_io_description(1000), "Clear, Sunny");
        assert_eq!(tomorrow_io_description(4201), "Heavy Rain");
        assert_eq!(tomorrow_io_description(8000), "Thunderstorm");
    }

    #[test]
    fn thunder_code_rules() {
        assert!(is_open_weather_thunder(200));
        assert!(is_open_weather_thunder(232));
        assert!(!is_open_weather_thunder(300));
        assert!(!is_open_weather_thunder(199));

        assert!(is_wmo_thunder(96));
        assert!(!is_wmo_thunder(82));

        assert!(is_tomorrow_io_thunder(8000));
        assert!(!is_tomorrow_io_thunder(4201));
    }

    #[test]
    fn lightning_wording_is_case_insensitive() {
        assert!(mentions_lightning("Thunderstorm: Slight or moderate"));
        assert!(mentions_lightning("LIGHTNING nearby"));
        assert!(!mentions_lightning("Heavy Rain"));
    }
}
