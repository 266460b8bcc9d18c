//! Coastal conditions: weather, tide, ocean and water-quality readings.
//!
//! Live weather comes from OpenWeather and live tides from NOAA when their keys
//! are configured. Every other reading, and any reading whose provider fails,
//! is simulated.

pub mod noaa;
pub mod openweather;
pub mod simulate;
pub mod types;

pub use noaa::Noaa;
pub use openweather::OpenWeather;
pub use types::{
    CoastalSnapshot, OceanReading, PollutionLevel, PollutionReading, ReadingSource, TideReading,
    TideType, WaterMonitoring, WaterQuality, WeatherReading,
};

use crate::config::Config;
use crate::location::ResolvedLocation;
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

const CUSTOM_COUNTRY: &str = "Custom";
const CUSTOM_TIMEZONE: &str = "UTC";

/// Builds snapshots for resolved locations.
#[derive(Debug, Clone, Default)]
pub struct ConditionsService {
    openweather: Option<OpenWeather>,
    noaa: Option<Noaa>,
}

impl ConditionsService {
    /// Simulation only.
    pub fn simulated() -> Self {
        Self::default()
    }

    pub fn with_openweather(mut self, api_key: impl Into<String>) -> Self {
        self.openweather = Some(OpenWeather::new(api_key));
        self
    }

    pub fn with_noaa(mut self, api_key: impl Into<String>) -> Self {
        self.noaa = Some(Noaa::new(api_key));
        self
    }

    /// Enable each provider whose key is configured.
    pub fn from_config(config: &Config) -> Self {
        let mut service = Self::simulated();
        if let Some(key) = &config.openweather_api_key {
            service = service.with_openweather(key.as_str());
        }
        if let Some(key) = &config.noaa_api_key {
            service = service.with_noaa(key.as_str());
        }
        service
    }

    /// True when any live provider is configured.
    pub fn is_live(&self) -> bool {
        self.openweather.is_some() || self.noaa.is_some()
    }

    /// Snapshot `location` at `now`. May block on the weather provider.
    pub fn snapshot(&self, location: &ResolvedLocation, now: DateTime<Utc>) -> CoastalSnapshot {
        let coordinates = location.coordinates();
        let hour = now.hour();
        let mut rng = simulate::seeded_rng(&coordinates, now);

        // Always drawn so the remaining readings don't depend on the provider.
        let simulated_weather = simulate::weather(location.latitude, hour, &mut rng);
        let weather = match &self.openweather {
            Some(provider) => match provider.current(location.latitude, location.longitude) {
                Ok(reading) => reading,
                Err(e) => {
                    warn!(location = %coordinates, error = %e, "weather provider failed; using simulation");
                    simulated_weather
                }
            },
            None => simulated_weather,
        };
        let simulated_tide = simulate::tide(hour);
        let tide = match (&self.noaa, noaa::nearest_station(location.latitude, location.longitude)) {
            (Some(provider), Some(station)) => match provider.latest(station) {
                Ok(reading) => reading,
                Err(e) => {
                    warn!(station = station.id, error = %e, "tide provider failed; using simulation");
                    simulated_tide
                }
            },
            _ => simulated_tide,
        };
        let ocean = simulate::ocean(hour, &mut rng);
        let pollution = simulate::pollution(hour, &mut rng);

        let (country, timezone) = match location.city() {
            Some(city) => (city.country, city.timezone),
            None => (CUSTOM_COUNTRY, CUSTOM_TIMEZONE),
        };

        debug!(
            location = %coordinates,
            weather = %weather.source,
            tide = %tide.source,
            "built coastal snapshot"
        );

        CoastalSnapshot {
            timestamp: now,
            location: coordinates,
            city_name: location.display_name.clone(),
            country: country.to_string(),
            timezone: timezone.to_string(),
            local_time: local_time(now, timezone),
            weather,
            tide,
            ocean,
            pollution,
        }
    }
}

fn local_time(now: DateTime<Utc>, timezone: &str) -> String {
    match timezone.parse::<Tz>() {
        Ok(tz) => now.with_timezone(&tz).to_rfc3339(),
        Err(_) => now.to_rfc3339(),
    }
}
