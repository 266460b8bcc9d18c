//! OpenWeather current-conditions provider.

use super::types::{ReadingSource, WeatherReading};
use crate::error::{CoastwatchError, Result};
use serde::Deserialize;
use std::time::Duration;

const ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize, Debug)]
struct OwMain {
    temp: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Deserialize, Debug)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Deserialize, Debug)]
struct OwCondition {
    description: String,
}

#[derive(Deserialize, Debug)]
struct OwResponse {
    main: OwMain,
    wind: OwWind,
    #[serde(default)]
    weather: Vec<OwCondition>,
}

impl OwResponse {
    fn into_reading(self) -> WeatherReading {
        WeatherReading {
            temperature: self.main.temp,
            humidity: self.main.humidity.clamp(0.0, 100.0).round() as u8,
            wind_speed: self.wind.speed,
            wind_direction: (self.wind.deg.rem_euclid(360.0).round() as u16) % 360,
            pressure: self.main.pressure,
            description: self
                .weather
                .into_iter()
                .next()
                .map(|c| c.description)
                .unwrap_or_else(|| "unknown".into()),
            source: ReadingSource::OpenWeather,
        }
    }
}

/// Blocking client; call from `spawn_blocking` inside async code.
#[derive(Debug, Clone)]
pub struct OpenWeather {
    api_key: String,
}

impl OpenWeather {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into() }
    }

    pub fn current(&self, lat: f64, lon: f64) -> Result<WeatherReading> {
        let response = ureq::get(ENDPOINT)
            .set("User-Agent", "Coastwatch/0.3 (coastal-alerts)")
            .query("lat", &lat.to_string())
            .query("lon", &lon.to_string())
            .query("units", "metric")
            .query("appid", &self.api_key)
            .timeout(TIMEOUT)
            .call()
            .map_err(|e| CoastwatchError::Provider(e.to_string()))?;

        let body: OwResponse = response
            .into_json()
            .map_err(|e| CoastwatchError::InvalidResponse(e.to_string()))?;

        Ok(body.into_reading())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let json = r#"{
            "main": { "temp": 29.4, "humidity": 78, "pressure": 1008 },
            "wind": { "speed": 6.2, "deg": 250 },
            "weather": [{ "description": "haze" }, { "description": "mist" }]
        }"#;
        let body: OwResponse = serde_json::from_str(json).unwrap();
        let reading = body.into_reading();
        assert_eq!(reading.temperature, 29.4);
        assert_eq!(reading.humidity, 78);
        assert_eq!(reading.wind_direction, 250);
        assert_eq!(reading.description, "haze");
        assert_eq!(reading.source, ReadingSource::OpenWeather);
    }

    #[test]
    fn test_parse_response_missing_optional() {
        let json = r#"{
            "main": { "temp": 12.0, "humidity": 101, "pressure": 995 },
            "wind": { "speed": 3.0 }
        }"#;
        let body: OwResponse = serde_json::from_str(json).unwrap();
        let reading = body.into_reading();
        assert_eq!(reading.humidity, 100);
        assert_eq!(reading.wind_direction, 0);
        assert_eq!(reading.description, "unknown");
    }
}
