//! Simulated readings, driven by latitude and UTC hour.
//!
//! Jitter comes from a caller-supplied RNG; [`seeded_rng`] derives one from the
//! location and the hour bucket so a snapshot is reproducible within the hour.

use super::types::{
    OceanReading, PollutionLevel, PollutionReading, ReadingSource, TideReading, TideType,
    WaterMonitoring, WaterQuality, WeatherReading,
};
use crate::location::string_hash;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

const TROPIC_LAT: f64 = 23.5;
const TEMPERATE_LAT: f64 = 45.0;

/// RNG keyed on `"lat,lon"` and the hour since the epoch.
pub fn seeded_rng(coordinates: &str, now: DateTime<Utc>) -> StdRng {
    let hash = string_hash(coordinates) as u32 as u64;
    let hour_bucket = now.timestamp().div_euclid(3600) as u64;
    StdRng::seed_from_u64((hash << 32) ^ hour_bucket)
}

fn round_to(v: f64, places: i32) -> f64 {
    let f = 10f64.powi(places);
    (v * f).round() / f
}

fn is_daytime(hour: u32) -> bool {
    (6..=18).contains(&hour)
}

pub fn weather<R: Rng>(lat: f64, hour: u32, rng: &mut R) -> WeatherReading {
    let mut temperature = if lat.abs() < TROPIC_LAT {
        28.0 + rng.gen_range(-2.0..=2.0)
    } else if lat.abs() < TEMPERATE_LAT {
        18.0 + rng.gen_range(-3.0..=3.0)
    } else {
        8.0 + rng.gen_range(-4.0..=4.0)
    };
    temperature += if is_daytime(hour) { 6.0 } else { -4.0 };

    // Sea breeze picks up in the afternoon.
    let wind_speed: f64 = if (10..=16).contains(&hour) {
        12.0 + rng.gen_range(-3.0..=8.0)
    } else {
        6.0 + rng.gen_range(-2.0..=4.0)
    };

    WeatherReading {
        temperature: round_to(temperature, 1),
        humidity: rng.gen_range(65..=85),
        wind_speed: round_to(wind_speed.max(0.0), 1),
        wind_direction: rng.gen_range(0..360),
        pressure: round_to(1013.0 + rng.gen_range(-12.0..=12.0), 1),
        description: "partly cloudy".into(),
        source: ReadingSource::Simulation,
    }
}

/// Semi-diurnal tide curve, peaking at 00:00 and 12:00 UTC.
pub fn tide(hour: u32) -> TideReading {
    let phase = (f64::from(hour) - 6.0) * PI / 12.0;
    TideReading {
        tide_height: round_to(1.8 + 1.2 * phase.sin().abs(), 2),
        tide_type: if is_daytime(hour) { TideType::Rising } else { TideType::Falling },
        source: ReadingSource::Simulation,
    }
}

pub fn ocean<R: Rng>(hour: u32, rng: &mut R) -> OceanReading {
    let wave_height = if (8..=16).contains(&hour) {
        1.8 + rng.gen_range(-0.3..=0.8)
    } else {
        1.2 + rng.gen_range(-0.2..=0.4)
    };

    OceanReading {
        wave_height: round_to(wave_height, 1),
        wave_period: round_to(8.0 + rng.gen_range(-1.0..=1.0), 1),
        current_speed: round_to(0.3 + rng.gen_range(-0.1..=0.2), 2),
        current_direction: round_to(45.0 + rng.gen_range(-15.0..=15.0), 1),
        sea_surface_temp: round_to(26.5 + rng.gen_range(-1.0..=1.0), 1),
        source: ReadingSource::Simulation,
    }
}

pub fn pollution<R: Rng>(hour: u32, rng: &mut R) -> PollutionReading {
    let rush_hour = (7..=9).contains(&hour) || (17..=19).contains(&hour);
    let (pollution_level, water_quality, bacteria_count) = if rush_hour {
        (PollutionLevel::Moderate, WaterQuality::Moderate, (180 + rng.gen_range(-40..=80)) as u32)
    } else {
        (PollutionLevel::Low, WaterQuality::Good, (90 + rng.gen_range(-25..=40)) as u32)
    };

    PollutionReading {
        water_quality,
        pollution_level,
        monitoring_data: WaterMonitoring {
            turbidity: round_to(10.0 + rng.gen_range(-2.0..=2.0), 2),
            dissolved_oxygen: round_to(7.0 + rng.gen_range(-0.4..=0.4), 2),
            ph: round_to(7.0 + rng.gen_range(-0.2..=0.2), 2),
            bacteria_count,
        },
        illegal_dumping_detected: rng.gen_bool(0.5),
        source: ReadingSource::Simulation,
    }
}
