//! Fixtures shared by unit tests, integration tests and benches.

use crate::error::LookupError;
use crate::offers::{ProviderId, RideOffer};
use crate::places::PlaceSuggester;
use crate::routing::{RouteLookup, RouteLookupResult, RouteTableEntry};

/// Unranked offer with a fixed rating.
pub fn test_offer(provider: ProviderId, fare: u32, eta: u32, travel: u32) -> RideOffer {
    RideOffer {
        provider,
        tier_name: format!("{provider} {fare}"),
        fare,
        eta_minutes: eta,
        travel_time_minutes: travel,
        rating: 4.5,
        recommendation: None,
    }
}

/// Route result with service-style display text.
pub fn test_route(distance_meters: u64, duration_seconds: u64) -> RouteLookupResult {
    RouteLookupResult {
        distance_text: format!("{:.1} km", distance_meters as f64 / 1000.0),
        distance_meters,
        duration_text: format!("{} mins", duration_seconds / 60),
        duration_seconds,
    }
}

pub fn test_table_entry(
    origin: &str,
    destination: &str,
    route: RouteLookupResult,
) -> RouteTableEntry {
    RouteTableEntry {
        origin: origin.to_string(),
        destination: destination.to_string(),
        route,
    }
}

/// Configured lookup whose every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingRouteLookup;

impl RouteLookup for FailingRouteLookup {
    fn lookup(
        &self,
        _origin: &str,
        _destination: &str,
    ) -> Result<Option<RouteLookupResult>, LookupError> {
        Err(LookupError::Api("UNKNOWN_ERROR".to_string()))
    }
}

/// Configured lookup that answers but never has a route.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRouteLookup;

impl RouteLookup for EmptyRouteLookup {
    fn lookup(
        &self,
        _origin: &str,
        _destination: &str,
    ) -> Result<Option<RouteLookupResult>, LookupError> {
        Ok(None)
    }
}

/// Case-insensitive substring match over a fixed address list; ignores the
/// country restriction.
#[derive(Debug, Clone, Default)]
pub struct StaticPlaceSuggester {
    pub places: Vec<String>,
}

impl StaticPlaceSuggester {
    pub fn new(places: &[&str]) -> Self {
        Self {
            places: places.iter().map(|place| place.to_string()).collect(),
        }
    }
}

impl PlaceSuggester for StaticPlaceSuggester {
    fn suggest(&self, partial: &str, _country: &str) -> Vec<String> {
        let needle = partial.to_lowercase();
        self.places
            .iter()
            .filter(|place| place.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}
