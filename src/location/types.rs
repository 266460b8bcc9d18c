//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which resolution tier produced a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    /// Parsed from a literal `"lat,lon"` pair.
    Coordinates,
    /// Matched a directory entry.
    Directory,
    /// Malformed or empty input, substituted with the default city.
    Default,
    /// Generated from the name's hash.
    Synthetic,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordinates => write!(f, "Coordinates"),
            Self::Directory => write!(f, "Directory"),
            Self::Default => write!(f, "Default"),
            Self::Synthetic => write!(f, "Synthetic"),
        }
    }
}

/// A coastal city in the built-in directory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoastalCity {
    pub key: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: &'static str,
    pub country: &'static str,
    /// IANA zone name.
    pub timezone: &'static str,
}

/// The resolver's output: coordinates plus a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
    pub source: LocationSource,
    /// Directory key, when the location came from the directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl ResolvedLocation {
    pub(crate) fn from_city(city: &CoastalCity, source: LocationSource) -> Self {
        Self {
            latitude: city.latitude,
            longitude: city.longitude,
            display_name: city.display_name.to_string(),
            source,
            key: Some(city.key.to_string()),
        }
    }

    /// The `"lat,lon"` form used to tag readings and alerts.
    pub fn coordinates(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// The directory entry behind this location, if any.
    pub fn city(&self) -> Option<&'static CoastalCity> {
        self.key.as_deref().and_then(super::directory::get)
    }

    pub fn display_line(&self) -> String {
        format!(
            "\u{1F4CD} {}\n  \u{1F4D0} {}\n  \u{1F50E} {}",
            self.display_name,
            super::directory::format_coords(self.latitude, self.longitude),
            self.source,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_key() {
        let loc = ResolvedLocation {
            latitude: 19.076,
            longitude: 72.8777,
            display_name: "Mumbai, India".into(),
            source: LocationSource::Directory,
            key: Some("mumbai".into()),
        };
        assert_eq!(loc.coordinates(), "19.076,72.8777");
        assert_eq!(loc.city().map(|c| c.country), Some("India"));
    }

    #[test]
    fn test_source_serializes_snake_case() {
        let json = serde_json::to_string(&LocationSource::Synthetic).unwrap();
        assert_eq!(json, "\"synthetic\"");
    }

    #[test]
    fn test_key_omitted_when_absent() {
        let loc = ResolvedLocation {
            latitude: 1.0,
            longitude: 2.0,
            display_name: "Custom Location (1.0000, 2.0000)".into(),
            source: LocationSource::Coordinates,
            key: None,
        };
        let json = serde_json::to_value(&loc).unwrap();
        assert!(json.get("key").is_none());
        assert_eq!(json["source"], "coordinates");
    }
}
