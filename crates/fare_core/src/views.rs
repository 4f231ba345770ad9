//! Filtered views over a ranked offer set (the "All / Economy / Premium /
//! Fastest" tabs).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::offers::RideOffer;

/// Offers at or above this fare are premium.
pub const PREMIUM_FARE_THRESHOLD: u32 = 300;
/// Number of offers shown on the fastest tab.
pub const FASTEST_VIEW_LEN: usize = 3;
/// Label given to the head of the fastest tab.
pub const FASTEST_OPTION_REASON: &str = "Fastest option";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferView {
    #[default]
    All,
    Economy,
    Premium,
    Fastest,
}

impl OfferView {
    pub const ALL: [Self; 4] = [Self::All, Self::Economy, Self::Premium, Self::Fastest];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Economy => "economy",
            Self::Premium => "premium",
            Self::Fastest => "fastest",
        }
    }
}

impl fmt::Display for OfferView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OfferView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|view| view.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown view '{s}'"))
    }
}

/// One card in a view. `reason` overrides the offer's own tag text when set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewEntry<'a> {
    pub offer: &'a RideOffer,
    pub highlighted: bool,
    pub reason: Option<&'static str>,
}

impl<'a> ViewEntry<'a> {
    fn from_tag(offer: &'a RideOffer) -> Self {
        Self {
            offer,
            highlighted: offer
                .recommendation
                .map(|tag| tag.is_highlighted())
                .unwrap_or(false),
            reason: offer.recommendation.map(|tag| tag.reason()),
        }
    }
}

/// Select and order the offers shown under `view`.
///
/// The fastest view sorts by total time (stable, so ties keep table order),
/// keeps the first three, and highlights only the first of them.
pub fn select(offers: &[RideOffer], view: OfferView) -> Vec<ViewEntry<'_>> {
    match view {
        OfferView::All => offers.iter().map(ViewEntry::from_tag).collect(),
        OfferView::Economy => offers
            .iter()
            .filter(|offer| offer.fare < PREMIUM_FARE_THRESHOLD)
            .map(ViewEntry::from_tag)
            .collect(),
        OfferView::Premium => offers
            .iter()
            .filter(|offer| offer.fare >= PREMIUM_FARE_THRESHOLD)
            .map(ViewEntry::from_tag)
            .collect(),
        OfferView::Fastest => {
            let mut sorted: Vec<&RideOffer> = offers.iter().collect();
            sorted.sort_by_key(|offer| offer.total_time_minutes());
            sorted
                .into_iter()
                .take(FASTEST_VIEW_LEN)
                .enumerate()
                .map(|(index, offer)| ViewEntry {
                    offer,
                    highlighted: index == 0,
                    reason: (index == 0).then_some(FASTEST_OPTION_REASON),
                })
                .collect()
        }
    }
}
