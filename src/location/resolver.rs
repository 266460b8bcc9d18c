//! Location resolver — the three-tier lookup.
//!
//! Flow: `"lat,lon"` pair → directory (exact, normalized, loose) → synthetic.
//! A string with a comma that fails to parse as a pair resolves to the default
//! city and never reaches the directory.

use super::directory;
use super::synthetic;
use super::types::{LocationSource, ResolvedLocation};

/// Resolve any location identifier. Total: every input yields a location.
pub fn resolve(query: &str) -> ResolvedLocation {
    if query.trim().is_empty() {
        return default_location();
    }

    if let Some((lat_raw, lon_raw)) = query.split_once(',') {
        return match (parse_leading_float(lat_raw), parse_leading_float(lon_raw)) {
            (Some(lat), Some(lon)) => from_coordinates(lat, lon),
            _ => default_location(),
        };
    }

    if let Some(city) = directory::lookup(query) {
        return ResolvedLocation::from_city(city, LocationSource::Directory);
    }

    synthetic::synthesize(query)
}

/// Build a location from an explicit coordinate pair.
pub fn from_coordinates(lat: f64, lon: f64) -> ResolvedLocation {
    ResolvedLocation {
        latitude: lat,
        longitude: lon,
        display_name: format!("Custom Location ({}, {})", to_fixed4(lat), to_fixed4(lon)),
        source: LocationSource::Coordinates,
        key: None,
    }
}

/// Four-decimal rendering with JavaScript `toFixed(4)` semantics.
///
/// Differs from `{:.4}` in three places: `-0` has no sign, exact halfway
/// values round away from zero rather than to even, and non-finite values
/// print as `Infinity`/`-Infinity`/`NaN`.
pub(crate) fn to_fixed4(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let sign = if v < 0.0 { "-" } else { "" };
    let magnitude = v.abs();

    // Exact binary ties expand to exactly five decimals ending in 5.
    let exact = format!("{:.40}", magnitude);
    let tie = exact
        .split_once('.')
        .map(|(_, frac)| frac.as_bytes()[4] == b'5' && frac.bytes().skip(5).all(|b| b == b'0'))
        .unwrap_or(false);

    let body = if tie {
        // magnitude * 1e4 is exactly n + 0.5 here.
        let units = (magnitude * 1e4).floor() as u128 + 1;
        format!("{}.{:04}", units / 10_000, units % 10_000)
    } else {
        format!("{:.4}", magnitude)
    };
    format!("{}{}", sign, body)
}

fn default_location() -> ResolvedLocation {
    ResolvedLocation::from_city(directory::default_city(), LocationSource::Default)
}

/// Parse the longest numeric prefix of `s` after leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent, and `Infinity`. Trailing garbage is ignored ("12.5km" → 12.5).
/// Returns `None` when there is no numeric prefix at all.
fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        let inf = f64::INFINITY;
        return Some(if bytes[0] == b'-' { -inf } else { inf });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| !v.is_nan())
}
