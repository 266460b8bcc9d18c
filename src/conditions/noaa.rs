//! NOAA Tides & Currents water-level predictions.

use super::types::{ReadingSource, TideReading, TideType};
use crate::error::{CoastwatchError, Result};
use serde::Deserialize;
use std::time::Duration;

const ENDPOINT: &str = "https://api.tidesandcurrents.noaa.gov/api/prod/datagetter";
const TIMEOUT: Duration = Duration::from_secs(10);

/// Stations farther than this (in degrees) are not used for a location.
const MAX_STATION_DISTANCE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Station {
    pub id: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

const STATIONS: &[Station] = &[
    Station { id: "9447130", name: "Seattle", lat: 47.6026, lon: -122.3393 },
    Station { id: "9410230", name: "San Diego", lat: 32.7157, lon: -117.1611 },
    Station { id: "9413450", name: "Monterey", lat: 36.6050, lon: -121.8880 },
    Station { id: "9414290", name: "San Francisco", lat: 37.8063, lon: -122.4659 },
];

/// Closest station by planar degree distance, if one is within range.
pub fn nearest_station(lat: f64, lon: f64) -> Option<&'static Station> {
    STATIONS
        .iter()
        .map(|s| (s, ((lat - s.lat).powi(2) + (lon - s.lon).powi(2)).sqrt()))
        .filter(|(_, d)| *d <= MAX_STATION_DISTANCE)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(s, _)| s)
}

#[derive(Deserialize, Debug)]
struct Prediction {
    /// Height in metres, sent as a string.
    v: String,
}

#[derive(Deserialize, Debug)]
struct ApiMessage {
    message: String,
}

#[derive(Deserialize, Debug)]
struct NoaaResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
    error: Option<ApiMessage>,
}

impl NoaaResponse {
    /// Latest prediction; the tide is rising when it is at or above the one before.
    fn into_reading(self) -> Result<TideReading> {
        if let Some(err) = self.error {
            return Err(CoastwatchError::InvalidResponse(err.message));
        }

        let heights = self
            .predictions
            .iter()
            .map(|p| {
                p.v.trim()
                    .parse::<f64>()
                    .map_err(|_| CoastwatchError::InvalidResponse(format!("bad water level '{}'", p.v)))
            })
            .collect::<Result<Vec<f64>>>()?;

        let (latest, earlier) = match heights.split_last() {
            Some(split) => split,
            None => return Err(CoastwatchError::InvalidResponse("no predictions".into())),
        };
        let rising = earlier.last().map_or(true, |prev| latest >= prev);

        Ok(TideReading {
            tide_height: *latest,
            tide_type: if rising { TideType::Rising } else { TideType::Falling },
            source: ReadingSource::Noaa,
        })
    }
}

/// Blocking client; call from `spawn_blocking` inside async code.
#[derive(Debug, Clone)]
pub struct Noaa {
    /// Sent as NOAA's `application` identifier.
    application: String,
}

impl Noaa {
    pub fn new(application: impl Into<String>) -> Self {
        Self { application: application.into() }
    }

    /// Hourly predictions for the last day at `station`, reduced to the latest.
    pub fn latest(&self, station: &Station) -> Result<TideReading> {
        let response = ureq::get(ENDPOINT)
            .set("User-Agent", "Coastwatch/0.3 (coastal-alerts)")
            .query("station", station.id)
            .query("product", "predictions")
            .query("datum", "MLLW")
            .query("time_zone", "lst_ldt")
            .query("interval", "h")
            .query("range", "24")
            .query("units", "metric")
            .query("format", "json")
            .query("application", &self.application)
            .timeout(TIMEOUT)
            .call()
            .map_err(|e| CoastwatchError::Provider(e.to_string()))?;

        let body: NoaaResponse = response
            .into_json()
            .map_err(|e| CoastwatchError::InvalidResponse(e.to_string()))?;

        body.into_reading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<TideReading> {
        serde_json::from_str::<NoaaResponse>(json).unwrap().into_reading()
    }

    #[test]
    fn test_nearest_station() {
        assert_eq!(nearest_station(37.77, -122.42).unwrap().name, "San Francisco");
        assert_eq!(nearest_station(32.7, -117.2).unwrap().id, "9410230");
        assert_eq!(nearest_station(47.6, -122.3).unwrap().name, "Seattle");
    }

    #[test]
    fn test_no_station_far_away() {
        assert!(nearest_station(19.076, 72.8777).is_none());
        assert!(nearest_station(25.7617, -80.1918).is_none());
    }

    #[test]
    fn test_parse_rising() {
        let reading = parse(
            r#"{ "predictions": [
                { "t": "2025-08-30 10:00", "v": "0.912" },
                { "t": "2025-08-30 11:00", "v": "1.204" }
            ] }"#,
        )
        .unwrap();
        assert_eq!(reading.tide_height, 1.204);
        assert_eq!(reading.tide_type, TideType::Rising);
        assert_eq!(reading.source, ReadingSource::Noaa);
    }

    #[test]
    fn test_parse_falling() {
        let reading = parse(r#"{ "predictions": [ { "v": "1.5" }, { "v": "1.1" } ] }"#).unwrap();
        assert_eq!(reading.tide_type, TideType::Falling);
    }

    #[test]
    fn test_parse_error_body() {
        let err = parse(r#"{ "error": { "message": "No Predictions data was found." } }"#).unwrap_err();
        assert!(err.to_string().contains("No Predictions"));
    }

    #[test]
    fn test_parse_empty_or_bad_values() {
        assert!(parse(r#"{ "predictions": [] }"#).is_err());
        assert!(parse(r#"{ "predictions": [ { "v": "" } ] }"#).is_err());
    }
}
