#![allow(dead_code)]

use fare_core::comparison::ComparisonService;
use fare_core::location::LocationPair;
use fare_core::pricing::PricingConfig;
use fare_core::routing::{RouteLookup, TableRouteLookup};
use fare_core::test_helpers::{test_route, test_table_entry};

/// Seeds used by tests that sweep the RNG.
pub const SWEEP_SEEDS: std::ops::Range<u64> = 0..250;

pub fn pair(pickup: &str, destination: &str) -> LocationPair {
    LocationPair::new(pickup, destination).expect("non-empty locations")
}

/// Service backed by `lookup` with the default pricing table.
pub fn service_with(lookup: impl RouteLookup + 'static) -> ComparisonService {
    ComparisonService::new(Box::new(lookup), PricingConfig::default())
}

/// Table with one Bengaluru route: 18.4 km, 47 minutes.
pub fn bengaluru_table() -> TableRouteLookup {
    TableRouteLookup::from_entries(vec![test_table_entry(
        "Indiranagar, Bengaluru",
        "Kempegowda International Airport",
        test_route(18_400, 2_820),
    )])
}
