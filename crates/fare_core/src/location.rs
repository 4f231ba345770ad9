//! Pickup/destination input for a single comparison.

use serde::{Deserialize, Serialize};

use crate::error::LocationError;

/// Label used when the rider picks "use my location" instead of typing an address.
pub const CURRENT_LOCATION: &str = "Current Location";

/// Length of free-text input in UTF-16 code units, the unit browser inputs
/// report. Characters outside the Basic Multilingual Plane count twice.
pub fn input_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Two free-text locations. Only non-emptiness is checked; any other string,
/// including [`CURRENT_LOCATION`], is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPair {
    pickup: String,
    destination: String,
}

impl LocationPair {
    pub fn new(
        pickup: impl Into<String>,
        destination: impl Into<String>,
    ) -> Result<Self, LocationError> {
        let pickup = pickup.into();
        let destination = destination.into();
        if pickup.is_empty() {
            return Err(LocationError::EmptyPickup);
        }
        if destination.is_empty() {
            return Err(LocationError::EmptyDestination);
        }
        Ok(Self {
            pickup,
            destination,
        })
    }

    pub fn pickup(&self) -> &str {
        &self.pickup
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Whether either end is the geolocation sentinel.
    pub fn uses_current_location(&self) -> bool {
        self.pickup == CURRENT_LOCATION || self.destination == CURRENT_LOCATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_pickup_and_destination() {
        assert_eq!(
            LocationPair::new("", "MG Road"),
            Err(LocationError::EmptyPickup)
        );
        assert_eq!(
            LocationPair::new("MG Road", ""),
            Err(LocationError::EmptyDestination)
        );
    }

    #[test]
    fn accepts_current_location_sentinel() {
        let pair = LocationPair::new(CURRENT_LOCATION, "Airport").expect("valid pair");
        assert!(pair.uses_current_location());
        assert_eq!(pair.pickup(), CURRENT_LOCATION);
        assert_eq!(pair.destination(), "Airport");
    }

    #[test]
    fn input_len_counts_utf16_units() {
        assert_eq!(input_len("MG Road"), 7);
        // Two code points, six bytes, two units.
        assert_eq!(input_len("दि"), 2);
        // One code point, four bytes, a surrogate pair.
        assert_eq!(input_len("🚕"), 2);
    }

    #[test]
    fn whitespace_only_input_is_not_trimmed() {
        let pair = LocationPair::new(" ", " ").expect("whitespace is non-empty");
        assert_eq!(pair.pickup(), " ");
        assert!(!pair.uses_current_location());
    }
}
