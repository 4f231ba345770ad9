//! Ride fare comparison engine.
//!
//! A comparison turns two free-text locations into five ranked ride offers:
//! [`distance`] estimates the trip (external [`routing`] lookup or a
//! deterministic fallback), [`pricing`] synthesizes fares and timings, and
//! [`ranking`] attaches recommendation tags. [`comparison`] wires the three
//! together and records the engagement [`counters`].

pub mod comparison;
pub mod config;
pub mod counters;
pub mod distance;
pub mod error;
pub mod location;
pub mod offers;
pub mod places;
pub mod pricing;
pub mod ranking;
pub mod routing;
pub mod savings;
pub mod views;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
