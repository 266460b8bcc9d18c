//! Deterministic placeholder coordinates for names missing from the directory.
//!
//! The hash is the classic 32-bit `h * 31 + c` string hash over UTF-16 code
//! units. Outputs are pinned by tests, so the recurrence, the wrapping, and the
//! sign-keeping remainder must not change.

use super::types::{LocationSource, ResolvedLocation};

const LAT_CLAMP: i32 = 60;
const LON_CLAMP: i32 = 150;
const LAT_SCALE: f64 = 0.6;
const LON_SCALE: f64 = 0.8;

/// 32-bit rolling string hash: `h = (h << 5) - h + c`, wrapping.
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
    })
}

/// Latitude/longitude bases before clamping. `%` keeps the dividend's sign.
fn bases(hash: i32) -> (i32, i32) {
    let lat = -90 + hash % 180;
    let lon = -180 + (hash >> 8) % 360;
    (lat, lon)
}

/// Pull extreme values toward plausible coastal bands.
fn coastal_bias(lat_base: i32, lon_base: i32) -> (f64, f64) {
    let mut lat = f64::from(lat_base);
    let mut lon = f64::from(lon_base);
    if lat_base.abs() > LAT_CLAMP {
        lat *= LAT_SCALE;
    }
    if lon_base.abs() > LON_CLAMP {
        lon *= LON_SCALE;
    }
    (lat, lon)
}

pub(crate) fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Synthetic tier of the resolver.
pub fn synthesize(query: &str) -> ResolvedLocation {
    let hash = string_hash(&query.to_lowercase());
    let (lat_base, lon_base) = bases(hash);
    let (lat, lon) = coastal_bias(lat_base, lon_base);

    ResolvedLocation {
        latitude: round4(lat),
        longitude: round4(lon),
        display_name: format!("{}, Coastal City", capitalize_first(query)),
        source: LocationSource::Synthetic,
        key: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_known_values() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("hello"), 99_162_322);
        assert_eq!(string_hash("timbuktu"), -2_079_150_751);
    }

    #[test]
    fn test_hash_uses_utf16_units() {
        // U+1F30A is a surrogate pair: two units, both folded in.
        let expected = 0i32
            .wrapping_mul(31)
            .wrapping_add(0xD83C)
            .wrapping_mul(31)
            .wrapping_add(0xDF0A);
        assert_eq!(string_hash("\u{1F30A}"), expected);
    }

    #[test]
    fn test_bases_keep_sign() {
        // -2079150751 % 180 == -91 in truncating division.
        assert_eq!(bases(-2_079_150_751), (-181, -263));
        assert_eq!(bases(97), (7, -180));
    }

    #[test]
    fn test_coastal_bias_thresholds() {
        assert_eq!(coastal_bias(60, 150), (60.0, 150.0));
        assert_eq!(coastal_bias(61, -151), (61.0 * 0.6, -151.0 * 0.8));
        assert_eq!(coastal_bias(-90, 0), (-90.0 * 0.6, 0.0));
    }

    #[test]
    fn test_synthesize_timbuktu() {
        let loc = synthesize("Timbuktu");
        assert_eq!(loc.latitude, -108.6);
        assert_eq!(loc.longitude, -210.4);
        assert_eq!(loc.display_name, "Timbuktu, Coastal City");
        assert_eq!(loc.source, LocationSource::Synthetic);
        assert!(loc.key.is_none());
    }

    #[test]
    fn test_synthesize_unclamped() {
        let loc = synthesize("goa");
        assert_eq!(loc.latitude, 11.0);
        assert_eq!(loc.longitude, -140.0);
    }

    #[test]
    fn test_synthesize_case_insensitive_coordinates() {
        let a = synthesize("zanzibar");
        let b = synthesize("ZANZIBAR");
        assert_eq!((a.latitude, a.longitude), (b.latitude, b.longitude));
        assert_eq!(a.display_name, "Zanzibar, Coastal City");
        assert_eq!(b.display_name, "ZANZIBAR, Coastal City");
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(37.8), 37.8);
        assert_eq!(round4(1.234_56), 1.2346);
        assert_eq!(round4(-133.600_000_000_000_02), -133.6);
    }
}
