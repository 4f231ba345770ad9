//! Fare synthesis: per-tier linear fares with bounded random jitter.
//!
//! Formula per tier: `fare = round(base_fare + distance_km * per_km_rate + jitter)`,
//! with `jitter` uniform in `[fare_jitter.min, fare_jitter.max)`. ETA and
//! travel time start from distance-derived baselines and receive small integer
//! offsets, each floored at the tier minimum.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distance::DistanceEstimate;
use crate::offers::{ProviderId, RideOffer};

/// Lowest baseline ETA in minutes.
pub const MIN_BASE_ETA_MINUTES: u32 = 2;
/// Lowest baseline travel time in minutes.
pub const MIN_BASE_TRAVEL_MINUTES: u32 = 10;
/// Baseline ETA grows by one minute every this many km.
pub const KM_PER_ETA_MINUTE: f64 = 3.0;
/// Baseline travel minutes per km.
pub const TRAVEL_MINUTES_PER_KM: f64 = 2.5;
/// Ratings never exceed this.
pub const MAX_RATING: f64 = 5.0;

/// Half-open uniform range `[min, max)` of fare jitter in currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JitterRange {
    pub min: f64,
    pub max: f64,
}

impl JitterRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max <= self.min {
            return self.min;
        }
        rng.gen_range(self.min..self.max)
    }
}

/// Inclusive integer offset range in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetRange {
    pub min: i32,
    pub max: i32,
}

impl OffsetRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        if self.max <= self.min {
            return self.min;
        }
        rng.gen_range(RangeInclusive::new(self.min, self.max))
    }
}

/// Pricing and timing parameters for one provider tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPricing {
    pub provider: ProviderId,
    pub tier_name: String,
    pub base_fare: f64,
    pub per_km_rate: f64,
    pub fare_jitter: JitterRange,
    pub eta_offset: OffsetRange,
    pub travel_offset: OffsetRange,
    pub min_eta_minutes: u32,
    pub min_travel_minutes: u32,
    pub base_rating: f64,
    /// Rating is `base_rating + uniform(0, rating_spread)`.
    pub rating_spread: f64,
}

impl TierPricing {
    #[allow(clippy::too_many_arguments)]
    fn preset(
        provider: ProviderId,
        tier_name: &str,
        base_fare: f64,
        per_km_rate: f64,
        fare_jitter: JitterRange,
        eta_offset: OffsetRange,
        travel_offset: OffsetRange,
        base_rating: f64,
        rating_spread: f64,
    ) -> Self {
        Self {
            provider,
            tier_name: tier_name.to_string(),
            base_fare,
            per_km_rate,
            fare_jitter,
            eta_offset,
            travel_offset,
            min_eta_minutes: 2,
            min_travel_minutes: 8,
            base_rating,
            rating_spread,
        }
    }

    /// Fare before jitter and rounding.
    pub fn expected_fare(&self, distance_km: f64) -> f64 {
        self.base_fare + distance_km * self.per_km_rate
    }

    fn offer<R: Rng + ?Sized>(&self, baseline: &Baseline, rng: &mut R) -> RideOffer {
        let raw_fare = self.expected_fare(baseline.distance_km) + self.fare_jitter.sample(rng);
        let fare = raw_fare.round().max(1.0) as u32;

        let eta_minutes = apply_offset(baseline.eta_minutes, self.eta_offset.sample(rng))
            .max(self.min_eta_minutes);
        let travel_time_minutes =
            apply_offset(baseline.travel_minutes, self.travel_offset.sample(rng))
                .max(self.min_travel_minutes);

        let spread = if self.rating_spread > 0.0 {
            rng.gen_range(0.0..self.rating_spread)
        } else {
            0.0
        };
        let rating = (self.base_rating + spread).clamp(1.0, MAX_RATING);

        RideOffer {
            provider: self.provider,
            tier_name: self.tier_name.clone(),
            fare,
            eta_minutes,
            travel_time_minutes,
            rating,
            recommendation: None,
        }
    }
}

fn apply_offset(base: u32, offset: i32) -> u32 {
    base.saturating_add_signed(offset)
}

/// Distance-derived ETA and travel baselines shared by every tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub distance_km: f64,
    pub eta_minutes: u32,
    pub travel_minutes: u32,
}

impl Baseline {
    pub fn from_distance(distance_km: f64) -> Self {
        let distance_km = distance_km.max(0.0);
        let eta = (distance_km / KM_PER_ETA_MINUTE).floor() as u32;
        let travel = (distance_km * TRAVEL_MINUTES_PER_KM).floor() as u32;
        Self {
            distance_km,
            eta_minutes: eta.max(MIN_BASE_ETA_MINUTES),
            travel_minutes: travel.max(MIN_BASE_TRAVEL_MINUTES),
        }
    }
}

/// Tier table used by [`synthesize`]. Offers come out in table order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub tiers: Vec<TierPricing>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        use ProviderId::{Ola, Rapido, Uber};
        Self {
            tiers: vec![
                TierPricing::preset(
                    Uber,
                    "UberGo",
                    50.0,
                    12.0,
                    JitterRange::new(-15.0, 15.0),
                    OffsetRange::new(0, 2),
                    OffsetRange::new(-2, 2),
                    4.5,
                    0.4,
                ),
                TierPricing::preset(
                    Ola,
                    "Ola Mini",
                    40.0,
                    10.0,
                    JitterRange::new(-12.0, 13.0),
                    OffsetRange::new(2, 5),
                    OffsetRange::new(-3, 2),
                    4.3,
                    0.5,
                ),
                TierPricing::preset(
                    Rapido,
                    "Bike",
                    30.0,
                    7.0,
                    JitterRange::new(-10.0, 10.0),
                    OffsetRange::new(-2, -1),
                    OffsetRange::new(-5, -3),
                    4.6,
                    0.3,
                ),
                TierPricing::preset(
                    Uber,
                    "Premier",
                    80.0,
                    18.0,
                    JitterRange::new(-20.0, 20.0),
                    OffsetRange::new(1, 3),
                    OffsetRange::new(-2, 1),
                    4.7,
                    0.2,
                ),
                TierPricing::preset(
                    Ola,
                    "Prime Sedan",
                    70.0,
                    16.0,
                    JitterRange::new(-17.0, 18.0),
                    OffsetRange::new(1, 4),
                    OffsetRange::new(-2, 2),
                    4.6,
                    0.3,
                ),
            ],
        }
    }
}

/// Produce one unranked offer per configured tier.
///
/// Non-deterministic unless `rng` is seeded; callers must not rely on exact
/// values.
pub fn synthesize<R: Rng + ?Sized>(
    config: &PricingConfig,
    distance: &DistanceEstimate,
    rng: &mut R,
) -> Vec<RideOffer> {
    let baseline = Baseline::from_distance(distance.distance_km);
    config
        .tiers
        .iter()
        .map(|tier| tier.offer(&baseline, rng))
        .collect()
}
