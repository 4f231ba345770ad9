mod support;

use std::fs;

use fare_core::config::CompareConfig;
use fare_core::distance::DistanceEstimator;
use fare_core::places::{suggest_places, DisabledPlaceSuggester, DEFAULT_COUNTRY};
use fare_core::routing::{build_route_lookup, RouteLookupKind, TableRouteLookup};
use fare_core::test_helpers::StaticPlaceSuggester;
use rand::rngs::StdRng;
use rand::SeedableRng;

const ROUTES_JSON: &str = r#"[
  {
    "origin": "Koramangala",
    "destination": "MG Road",
    "distance_text": "6.2 km",
    "distance_meters": 6200,
    "duration_text": "24 mins",
    "duration_seconds": 1440
  },
  {
    "origin": "MG Road",
    "destination": "Koramangala",
    "distance_text": "6.8 km",
    "distance_meters": 6800,
    "duration_text": "27 mins",
    "duration_seconds": 1620
  }
]"#;

fn write_routes(dir: &tempfile::TempDir) -> String {
    let path = dir.path().join("routes.json");
    fs::write(&path, ROUTES_JSON).expect("write route table");
    path.to_string_lossy().into_owned()
}

#[test]
fn route_table_file_loads_both_directions() {
    let dir = tempfile::tempdir().expect("temp dir");
    let table = TableRouteLookup::from_file(write_routes(&dir)).expect("table");
    assert_eq!(table.len(), 2);

    let estimator = DistanceEstimator::new(&table);
    let there = estimator.estimate("Koramangala", "MG Road");
    let back = estimator.estimate("MG Road", "Koramangala");
    assert_eq!(there.distance_text(), "6.2 km");
    assert_eq!(back.distance_text(), "6.8 km");
    assert_eq!(back.estimate().duration_minutes, 27);
}

#[test]
fn built_table_lookup_is_cached_and_configured() {
    let dir = tempfile::tempdir().expect("temp dir");
    let lookup = build_route_lookup(
        &RouteLookupKind::Table {
            path: write_routes(&dir),
        },
        16,
    );
    assert!(lookup.is_configured());

    let estimate = DistanceEstimator::new(lookup.as_ref()).estimate("Koramangala", "MG Road");
    assert!(estimate.is_authoritative());
    assert_eq!(estimate.estimate().distance_km, 6.2);
}

#[test]
fn malformed_route_table_degrades_to_simulation() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("routes.json");
    fs::write(&path, "{ not a table").expect("write");

    assert!(TableRouteLookup::from_file(&path).is_err());
    let lookup = build_route_lookup(
        &RouteLookupKind::Table {
            path: path.to_string_lossy().into_owned(),
        },
        16,
    );
    assert!(!lookup.is_configured());
}

#[test]
fn config_with_route_table_runs_authoritative_comparisons() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = CompareConfig::default()
        .with_route_table(write_routes(&dir))
        .with_seed(4);
    let service = fare_core::comparison::ComparisonService::new(
        config.build_route_lookup(),
        config.pricing.clone(),
    );

    let result = service.compare(&support::pair("Koramangala", "MG Road"), &mut config.rng());
    assert!(result.estimate.is_authoritative());
    assert_eq!(result.offers.len(), 5);
}

#[test]
fn suggestions_need_three_characters() {
    let suggester = StaticPlaceSuggester::new(&[
        "MG Road, Bengaluru, Karnataka, India",
        "Koramangala, Bengaluru, Karnataka, India",
        "Marine Drive, Mumbai, Maharashtra, India",
    ]);

    assert!(suggest_places(&suggester, "", DEFAULT_COUNTRY).is_empty());
    assert!(suggest_places(&suggester, "MG", DEFAULT_COUNTRY).is_empty());
    assert_eq!(
        suggest_places(&suggester, "mg ", DEFAULT_COUNTRY),
        vec!["MG Road, Bengaluru, Karnataka, India".to_string()]
    );
    assert_eq!(suggest_places(&suggester, "Bengaluru", DEFAULT_COUNTRY).len(), 2);
}

#[test]
fn multibyte_input_is_counted_in_utf16_units() {
    let suggester = StaticPlaceSuggester::new(&["बेंगलुरु", "🚕 stand, Majestic"]);
    // Two units, six bytes.
    assert!(suggest_places(&suggester, "बे", DEFAULT_COUNTRY).is_empty());
    assert_eq!(suggest_places(&suggester, "बेंग", DEFAULT_COUNTRY).len(), 1);
    // The taxi emoji alone is a surrogate pair; a trailing space makes three.
    assert!(suggest_places(&suggester, "🚕", DEFAULT_COUNTRY).is_empty());
    assert_eq!(
        suggest_places(&suggester, "🚕 ", DEFAULT_COUNTRY),
        vec!["🚕 stand, Majestic".to_string()]
    );
}

#[test]
fn unconfigured_suggester_returns_nothing() {
    assert!(suggest_places(&DisabledPlaceSuggester, "Koramangala", DEFAULT_COUNTRY).is_empty());
    let config = CompareConfig::default();
    let suggester = config.build_place_suggester();
    assert!(suggest_places(suggester.as_ref(), "Koramangala", &config.country).is_empty());
}

#[test]
fn seeded_config_rng_gives_identical_comparisons() {
    let config = CompareConfig::default().with_seed(77);
    let service = support::service_with(fare_core::routing::DisabledRouteLookup);
    let pair = support::pair("Hebbal", "Bellandur");

    let first = service.compare(&pair, &mut config.rng());
    let second = service.compare(&pair, &mut StdRng::seed_from_u64(77));
    assert_eq!(first, second);
}
