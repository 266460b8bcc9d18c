//! Reading types for the coastal conditions snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingSource {
    #[serde(rename = "realistic_simulation")]
    Simulation,
    #[serde(rename = "openweather_api")]
    OpenWeather,
    #[serde(rename = "noaa_api")]
    Noaa,
}

impl fmt::Display for ReadingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simulation => write!(f, "Simulation"),
            Self::OpenWeather => write!(f, "OpenWeather"),
            Self::Noaa => write!(f, "NOAA"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// °C
    pub temperature: f64,
    /// Percent.
    pub humidity: u8,
    /// m/s
    pub wind_speed: f64,
    /// Degrees from north.
    pub wind_direction: u16,
    /// hPa
    pub pressure: f64,
    pub description: String,
    pub source: ReadingSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TideType {
    Rising,
    Falling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TideReading {
    /// Metres.
    pub tide_height: f64,
    pub tide_type: TideType,
    pub source: ReadingSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OceanReading {
    /// Metres.
    pub wave_height: f64,
    /// Seconds.
    pub wave_period: f64,
    /// m/s
    pub current_speed: f64,
    pub current_direction: f64,
    /// °C
    pub sea_surface_temp: f64,
    pub source: ReadingSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollutionLevel {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterQuality {
    Good,
    Moderate,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterMonitoring {
    /// NTU
    pub turbidity: f64,
    /// mg/L
    pub dissolved_oxygen: f64,
    pub ph: f64,
    /// CFU per 100 mL.
    pub bacteria_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutionReading {
    pub water_quality: WaterQuality,
    pub pollution_level: PollutionLevel,
    pub monitoring_data: WaterMonitoring,
    pub illegal_dumping_detected: bool,
    pub source: ReadingSource,
}

/// Everything known about one location at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoastalSnapshot {
    pub timestamp: DateTime<Utc>,
    /// `"lat,lon"`
    pub location: String,
    pub city_name: String,
    pub country: String,
    pub timezone: String,
    /// Wall-clock time in `timezone`, RFC 3339.
    pub local_time: String,
    pub weather: WeatherReading,
    pub tide: TideReading,
    pub ocean: OceanReading,
    pub pollution: PollutionReading,
}
