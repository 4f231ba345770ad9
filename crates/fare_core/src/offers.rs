//! Ride offers produced by a comparison.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mock ride providers covered by a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Uber,
    Ola,
    Rapido,
}

impl ProviderId {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Uber => "Uber",
            Self::Ola => "Ola",
            Self::Rapido => "Rapido",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Recommendation badge. At most one per offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecommendationTag {
    LowestPrice,
    FastestArrival,
    BestValue,
}

impl RecommendationTag {
    pub fn reason(self) -> &'static str {
        match self {
            Self::LowestPrice => "Lowest price",
            Self::FastestArrival => "Fastest arrival",
            Self::BestValue => "Best overall value",
        }
    }

    /// Only best-value offers get the highlighted "BEST" card.
    pub fn is_highlighted(self) -> bool {
        matches!(self, Self::BestValue)
    }
}

/// One synthesized fare/ETA/rating record for a single provider tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideOffer {
    pub provider: ProviderId,
    pub tier_name: String,
    /// Whole currency units.
    pub fare: u32,
    pub eta_minutes: u32,
    pub travel_time_minutes: u32,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<RecommendationTag>,
}

impl RideOffer {
    /// Pickup wait plus time on the road.
    pub fn total_time_minutes(&self) -> u32 {
        self.eta_minutes.saturating_add(self.travel_time_minutes)
    }
}
