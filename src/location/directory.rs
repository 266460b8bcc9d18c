//! Built-in directory of coastal cities.
//!
//! Insertion order matters: the loose key match walks the table front to back,
//! and the first entry is the default city.

use super::types::CoastalCity;
use serde::Serialize;

// ─── Built-in dataset ───────────────────────────────────────────

const COASTAL_CITIES: &[CoastalCity] = &[
    CoastalCity {
        key: "mumbai",
        latitude: 19.0760, longitude: 72.8777,
        display_name: "Mumbai, India",
        country: "India", timezone: "Asia/Kolkata",
    },
    CoastalCity {
        key: "miami",
        latitude: 25.7617, longitude: -80.1918,
        display_name: "Miami, USA",
        country: "USA", timezone: "America/New_York",
    },
    CoastalCity {
        key: "sydney",
        latitude: -33.8688, longitude: 151.2093,
        display_name: "Sydney, Australia",
        country: "Australia", timezone: "Australia/Sydney",
    },
    CoastalCity {
        key: "tokyo",
        latitude: 35.6762, longitude: 139.6503,
        display_name: "Tokyo, Japan",
        country: "Japan", timezone: "Asia/Tokyo",
    },
    CoastalCity {
        key: "london",
        latitude: 51.5074, longitude: -0.1278,
        display_name: "London, UK",
        country: "UK", timezone: "Europe/London",
    },
    CoastalCity {
        key: "rio",
        latitude: -22.9068, longitude: -43.1729,
        display_name: "Rio de Janeiro, Brazil",
        country: "Brazil", timezone: "America/Sao_Paulo",
    },
    CoastalCity {
        key: "cape_town",
        latitude: -33.9249, longitude: 18.4241,
        display_name: "Cape Town, South Africa",
        country: "South Africa", timezone: "Africa/Johannesburg",
    },
    CoastalCity {
        key: "singapore",
        latitude: 1.3521, longitude: 103.8198,
        display_name: "Singapore",
        country: "Singapore", timezone: "Asia/Singapore",
    },
    CoastalCity {
        key: "dubai",
        latitude: 25.2048, longitude: 55.2708,
        display_name: "Dubai, UAE",
        country: "UAE", timezone: "Asia/Dubai",
    },
    CoastalCity {
        key: "vancouver",
        latitude: 49.2827, longitude: -123.1207,
        display_name: "Vancouver, Canada",
        country: "Canada", timezone: "America/Vancouver",
    },
    CoastalCity {
        key: "new_york",
        latitude: 40.7128, longitude: -74.0060,
        display_name: "New York, USA",
        country: "USA", timezone: "America/New_York",
    },
    CoastalCity {
        key: "chennai",
        latitude: 13.0827, longitude: 80.2707,
        display_name: "Chennai, India",
        country: "India", timezone: "Asia/Kolkata",
    },
    CoastalCity {
        key: "kolkata",
        latitude: 22.5726, longitude: 88.3639,
        display_name: "Kolkata, India",
        country: "India", timezone: "Asia/Kolkata",
    },
];

/// The whole directory, in insertion order.
pub fn directory() -> &'static [CoastalCity] {
    COASTAL_CITIES
}

/// The fallback city for malformed input.
pub fn default_city() -> &'static CoastalCity {
    &COASTAL_CITIES[0]
}

/// Exact key lookup, no normalization.
pub fn get(key: &str) -> Option<&'static CoastalCity> {
    COASTAL_CITIES.iter().find(|c| c.key == key)
}

/// Collapse the three separator styles (space, hyphen, underscore) to `_`.
pub(crate) fn normalize_key(query: &str) -> String {
    query.to_lowercase().replace(' ', "_").replace('-', "_")
}

/// Directory tier of the resolver: exact normalized key, then a loose walk.
pub fn lookup(query: &str) -> Option<&'static CoastalCity> {
    let normalized = normalize_key(query);
    if let Some(city) = get(&normalized) {
        return Some(city);
    }

    let lowered = query.to_lowercase();
    let squashed = normalized.replace('_', "");
    COASTAL_CITIES.iter().find(|city| {
        normalized == city.key
            || city.key.replace('_', "") == squashed
            || city.key.replace('_', " ") == lowered
    })
}

/// A directory entry for the public locations API.
#[derive(Debug, Clone, Serialize)]
pub struct CityInfo {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
    pub timezone: String,
}

/// The directory as API records (for the location picker).
pub fn city_list() -> Vec<CityInfo> {
    COASTAL_CITIES
        .iter()
        .map(|c| CityInfo {
            id: c.key.to_string(),
            name: c.display_name.to_string(),
            lat: c.latitude,
            lon: c.longitude,
            country: c.country.to_string(),
            timezone: c.timezone.to_string(),
        })
        .collect()
}

/// Human-readable coordinates, e.g. `19.0760°N, 72.8777°E`.
pub fn format_coords(lat: f64, lon: f64) -> String {
    let ns = if lat >= 0.0 { 'N' } else { 'S' };
    let ew = if lon >= 0.0 { 'E' } else { 'W' };
    format!("{:.4}\u{00B0}{}, {:.4}\u{00B0}{}", lat.abs(), ns, lon.abs(), ew)
}
