//! Error types shared across the crate.
//!
//! Fare synthesis and ranking never fail; these errors only cover the
//! collaborators around them (route lookups, the counter store, config files)
//! and input gating.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected location input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("pickup location must not be empty")]
    EmptyPickup,
    #[error("destination must not be empty")]
    EmptyDestination,
}

/// Failure of an external route or place lookup.
///
/// Every variant is absorbed by [`crate::distance::DistanceEstimator`] and
/// turned into the fallback estimate.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("route lookup is not configured")]
    NotConfigured,
    #[cfg(feature = "google-maps")]
    #[error("route lookup request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("route lookup returned status {0}")]
    Api(String),
    #[error("route lookup response was malformed: {0}")]
    Malformed(String),
}

/// Failure reading or writing the persistent counter store.
#[derive(Debug, Error)]
pub enum CounterStoreError {
    #[error("failed to access counter file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize counters: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("counter store lock was poisoned")]
    Poisoned,
}

/// Failure loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
