//! Distance estimation: external route lookup with a deterministic fallback.

use serde::{Deserialize, Serialize};

use crate::location::{input_len, LocationPair};
use crate::routing::{RouteLookup, RouteLookupResult};

/// Fallback distance for a zero-length combination (km).
pub const FALLBACK_BASE_KM: f64 = 5.0;
/// Fallback distance added per unit of combined input length (km).
pub const FALLBACK_KM_PER_STEP: f64 = 2.5;
/// Combined input length wraps at this modulus.
pub const FALLBACK_LENGTH_MODULUS: usize = 20;
/// Minutes of travel assumed per fallback kilometre.
pub const FALLBACK_MINUTES_PER_KM: f64 = 2.5;

/// Distance and duration for one comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceEstimate {
    pub distance_km: f64,
    pub duration_minutes: u32,
    /// Whether the numbers came from an external route service. Display only.
    pub is_authoritative: bool,
}

impl DistanceEstimate {
    /// `"12.5 km"`.
    pub fn distance_display(&self) -> String {
        format!("{:.1} km", self.distance_km)
    }

    pub fn duration_display(&self) -> String {
        format_duration(self.duration_minutes)
    }
}

/// Outcome of [`DistanceEstimator::estimate`]. Both branches carry a usable
/// estimate; the variant says where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Estimate {
    /// Sourced from the route lookup, passed through unmodified.
    Authoritative {
        estimate: DistanceEstimate,
        route: RouteLookupResult,
    },
    /// Derived from the input lengths.
    Fallback { estimate: DistanceEstimate },
}

impl Estimate {
    pub fn estimate(&self) -> &DistanceEstimate {
        match self {
            Self::Authoritative { estimate, .. } | Self::Fallback { estimate } => estimate,
        }
    }

    pub fn is_authoritative(&self) -> bool {
        matches!(self, Self::Authoritative { .. })
    }

    /// Distance text as shown to the rider: the service's own text when
    /// authoritative, otherwise `"{:.1} km"`.
    pub fn distance_text(&self) -> String {
        match self {
            Self::Authoritative { route, .. } => route.distance_text.clone(),
            Self::Fallback { estimate } => estimate.distance_display(),
        }
    }

    pub fn duration_text(&self) -> String {
        match self {
            Self::Authoritative { route, .. } => route.duration_text.clone(),
            Self::Fallback { estimate } => estimate.duration_display(),
        }
    }
}

/// Render minutes as `"31 min"`, or `"2 hr 5 min"` from one hour up.
pub fn format_duration(minutes: u32) -> String {
    if minutes >= 60 {
        format!("{} hr {} min", minutes / 60, minutes % 60)
    } else {
        format!("{minutes} min")
    }
}

/// Deterministic estimate from the lengths of the two inputs, counted by
/// [`input_len`].
pub fn fallback_estimate(origin: &str, destination: &str) -> DistanceEstimate {
    let combined = (input_len(origin) + input_len(destination)) % FALLBACK_LENGTH_MODULUS;
    // `combined` < 20, so the conversion is exact.
    let distance_km = FALLBACK_BASE_KM + combined as f64 * FALLBACK_KM_PER_STEP;
    DistanceEstimate {
        distance_km,
        duration_minutes: round_minutes(distance_km * FALLBACK_MINUTES_PER_KM),
        is_authoritative: false,
    }
}

fn round_minutes(minutes: f64) -> u32 {
    minutes.round().max(0.0) as u32
}

/// Minutes are rounded and floored at one, so a real route never reports a
/// zero-minute trip.
fn authoritative_estimate(route: &RouteLookupResult) -> DistanceEstimate {
    DistanceEstimate {
        distance_km: route.distance_meters as f64 / 1000.0,
        duration_minutes: round_minutes(route.duration_seconds as f64 / 60.0).max(1),
        is_authoritative: true,
    }
}

/// Turns a location pair into a [`DistanceEstimate`], never failing.
pub struct DistanceEstimator<'a> {
    lookup: &'a dyn RouteLookup,
}

impl<'a> DistanceEstimator<'a> {
    pub fn new(lookup: &'a dyn RouteLookup) -> Self {
        Self { lookup }
    }

    pub fn estimate_pair(&self, pair: &LocationPair) -> Estimate {
        self.estimate(pair.pickup(), pair.destination())
    }

    /// Ask the route lookup; on anything other than a non-zero route, use
    /// [`fallback_estimate`].
    pub fn estimate(&self, origin: &str, destination: &str) -> Estimate {
        if self.lookup.is_configured() {
            match self.lookup.lookup(origin, destination) {
                Ok(Some(route)) if route.distance_meters > 0 => {
                    return Estimate::Authoritative {
                        estimate: authoritative_estimate(&route),
                        route,
                    };
                }
                Ok(Some(_)) => tracing::debug!("route lookup reported zero distance"),
                Ok(None) => tracing::debug!("route lookup returned no result"),
                Err(error) => tracing::warn!(%error, "route lookup failed"),
            }
        }

        tracing::debug!(origin, destination, "using simulated distance");
        Estimate::Fallback {
            estimate: fallback_estimate(origin, destination),
        }
    }
}
