//! One comparison end to end: estimate distance, synthesize offers, rank them,
//! and record the engagement counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use rand::Rng;
use serde::Serialize;

use crate::counters::{CounterKey, CounterSnapshot, CounterStore};
use crate::distance::{DistanceEstimator, Estimate};
use crate::error::CounterStoreError;
use crate::location::LocationPair;
use crate::offers::{RecommendationTag, RideOffer};
use crate::pricing::{synthesize, PricingConfig};
use crate::ranking::rank;
use crate::routing::RouteLookup;
use crate::savings::{comparison_savings, Milestone};

/// Ranked offers for one location pair. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub pair: LocationPair,
    pub estimate: Estimate,
    pub offers: Vec<RideOffer>,
}

impl ComparisonResult {
    pub fn offers_tagged(&self, tag: RecommendationTag) -> impl Iterator<Item = &RideOffer> {
        self.offers
            .iter()
            .filter(move |offer| offer.recommendation == Some(tag))
    }
}

/// Runs comparisons against a shared route lookup and pricing table.
pub struct ComparisonService {
    lookup: Box<dyn RouteLookup>,
    pricing: PricingConfig,
}

impl ComparisonService {
    pub fn new(lookup: Box<dyn RouteLookup>, pricing: PricingConfig) -> Self {
        Self { lookup, pricing }
    }

    pub fn is_lookup_configured(&self) -> bool {
        self.lookup.is_configured()
    }

    /// Estimate, synthesize and rank. Never fails; lookup problems degrade to
    /// the simulated distance.
    pub fn compare<R: Rng + ?Sized>(&self, pair: &LocationPair, rng: &mut R) -> ComparisonResult {
        let estimate = DistanceEstimator::new(self.lookup.as_ref()).estimate_pair(pair);
        let offers = rank(synthesize(&self.pricing, estimate.estimate(), rng));
        tracing::debug!(
            pickup = pair.pickup(),
            destination = pair.destination(),
            authoritative = estimate.is_authoritative(),
            distance_km = estimate.estimate().distance_km,
            "comparison complete"
        );
        ComparisonResult {
            pair: pair.clone(),
            estimate,
            offers,
        }
    }
}

/// Counter state after a comparison was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonRecord {
    pub counters: CounterSnapshot,
    pub savings_added: u64,
    pub milestone: Option<Milestone>,
}

/// Bump `comparisonsMade` and `ridesCompared` by one and `totalSavings` by the
/// synthetic savings of `result`, all in one store write.
pub fn record_comparison(
    store: &dyn CounterStore,
    result: &ComparisonResult,
) -> Result<ComparisonRecord, CounterStoreError> {
    let savings_added = comparison_savings(&result.offers);
    let counters = store.increment_many(&[
        (CounterKey::ComparisonsMade, 1),
        (CounterKey::RidesCompared, 1),
        (CounterKey::TotalSavings, savings_added),
    ])?;

    let milestone = Milestone::for_count(counters.comparisons_made);
    if let Some(milestone) = milestone {
        tracing::info!(comparisons_made = counters.comparisons_made, "{}", milestone.title());
    }

    Ok(ComparisonRecord {
        counters,
        savings_added,
        milestone,
    })
}

/// Identifies one comparison request. Later requests get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Holds the result currently on display, last-write-wins by request order.
///
/// A comparison takes a ticket with [`ComparisonBoard::begin`] before it
/// starts; when it finishes, [`ComparisonBoard::publish`] only replaces the
/// shown result if no newer request has already published.
#[derive(Debug, Default)]
pub struct ComparisonBoard {
    next_ticket: AtomicU64,
    shown: Mutex<Option<(Ticket, Arc<ComparisonResult>)>>,
}

impl ComparisonBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        Ticket(self.next_ticket.fetch_add(1, Ordering::SeqCst))
    }

    /// Returns whether `result` is now the one on display.
    pub fn publish(&self, ticket: Ticket, result: ComparisonResult) -> bool {
        let mut shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((current, _)) = shown.as_ref() {
            if *current > ticket {
                tracing::debug!(?ticket, ?current, "discarding stale comparison result");
                return false;
            }
        }
        *shown = Some((ticket, Arc::new(result)));
        true
    }

    pub fn current(&self) -> Option<Arc<ComparisonResult>> {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, result)| Arc::clone(result))
    }
}
