use coastwatch::location::{directory, resolve, string_hash, LocationSource};

#[test]
fn test_every_directory_key_round_trips() {
    for city in directory() {
        let loc = resolve(city.key);
        assert_eq!(loc.latitude, city.latitude, "{}", city.key);
        assert_eq!(loc.longitude, city.longitude, "{}", city.key);
        assert_eq!(loc.display_name, city.display_name, "{}", city.key);
        assert_eq!(loc.source, LocationSource::Directory);
    }
}

#[test]
fn test_spaced_and_hyphenated_keys_match() {
    for city in directory() {
        let spaced = city.key.replace('_', " ");
        let hyphenated = city.key.replace('_', "-").to_uppercase();
        assert_eq!(resolve(&spaced).key.as_deref(), Some(city.key));
        assert_eq!(resolve(&hyphenated).key.as_deref(), Some(city.key));
    }
}

#[test]
fn test_coordinate_pairs_round_trip() {
    let pairs = [(0.0, 0.0), (-45.5, 170.25), (89.9999, -179.9999), (12.0, -0.5)];
    for (lat, lon) in pairs {
        let loc = resolve(&format!("{},{}", lat, lon));
        assert_eq!((loc.latitude, loc.longitude), (lat, lon));
        assert!(loc.display_name.contains(&format!("{:.4}", lat)));
        assert!(loc.display_name.contains(&format!("{:.4}", lon)));
    }
}

#[test]
fn test_malformed_pairs_never_synthesize() {
    for q in ["abc,def", "12,", "my,place", ",", "tokyo,japan"] {
        let loc = resolve(q);
        assert_eq!(loc.source, LocationSource::Default, "{:?}", q);
        assert_eq!(loc.key.as_deref(), Some("mumbai"));
    }
}

#[test]
fn test_synthetic_clamping() {
    let names = ["atlantis", "zanzibar", "kochi", "hello", "my", "Lemuria", "port blair", "xanadu"];
    for name in names {
        let hash = string_hash(&name.to_lowercase());
        let lat_base = -90 + hash % 180;
        let lon_base = -180 + (hash >> 8) % 360;
        let loc = resolve(name);
        assert_eq!(loc.source, LocationSource::Synthetic, "{}", name);

        let expected_lat = if lat_base.abs() > 60 { f64::from(lat_base) * 0.6 } else { f64::from(lat_base) };
        let expected_lon = if lon_base.abs() > 150 { f64::from(lon_base) * 0.8 } else { f64::from(lon_base) };
        assert_eq!(loc.latitude, (expected_lat * 10_000.0).round() / 10_000.0, "{}", name);
        assert_eq!(loc.longitude, (expected_lon * 10_000.0).round() / 10_000.0, "{}", name);
    }
}

#[test]
fn test_synthetic_known_outputs() {
    let cases = [
        ("atlantis", -49.2, -110.0),
        ("zanzibar", 37.8, 144.0),
        ("kochi", -44.4, -116.0),
        ("my", -10.0, -133.6),
    ];
    for (name, lat, lon) in cases {
        let loc = resolve(name);
        assert_eq!((loc.latitude, loc.longitude), (lat, lon), "{}", name);
    }
}

#[test]
fn test_resolve_is_deterministic_across_threads() {
    let expected = resolve("Timbuktu");
    let handles: Vec<_> = (0..4).map(|_| std::thread::spawn(|| resolve("Timbuktu"))).collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
