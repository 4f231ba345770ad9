//! Pluggable route lookups: trait abstraction for distance/duration backends.
//!
//! Three implementations, selectable via [`RouteLookupKind`]:
//!
//! - **`DisabledRouteLookup`**: No credential configured. Every call reports
//!   [`LookupError::NotConfigured`], which the estimator treats like a failure.
//! - **`GoogleMapsClient`** (feature `google-maps`): Distance Matrix web service,
//!   with the Directions service as a second attempt.
//! - **`TableRouteLookup`**: Fixed origin/destination table loaded from a JSON file.
//!
//! Configured backends are wrapped in a [`CachedRouteLookup`] by
//! [`build_route_lookup`].

use std::collections::HashMap;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Mutex;

use lru::LruCache;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

#[cfg(feature = "google-maps")]
pub mod google;

/// Placeholder value shipped in sample env files; treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "your_google_maps_api_key_here";

/// Default route cache capacity for configured lookups.
pub const DEFAULT_ROUTE_CACHE_CAPACITY: usize = 1_000;

// ---------------------------------------------------------------------------
// Core types
// ---------------------------------------------------------------------------

/// Distance and duration reported by an external route service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteLookupResult {
    /// Human-readable distance as reported by the service (e.g. `"12.4 km"`).
    pub distance_text: String,
    pub distance_meters: u64,
    /// Human-readable duration as reported by the service (e.g. `"31 mins"`).
    pub duration_text: String,
    pub duration_seconds: u64,
}

/// Which route backend to use.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub enum RouteLookupKind {
    /// No credential: always fall back to the synthetic estimate.
    #[default]
    Disabled,
    /// Google Maps web services with the given API key.
    #[cfg(feature = "google-maps")]
    GoogleMaps { api_key: String },
    /// Route table loaded from a JSON file.
    Table { path: String },
}

/// Trait for route backends. Implementations must be `Send + Sync` so one
/// lookup can be shared by every comparison.
pub trait RouteLookup: Send + Sync {
    /// Whether a credential or data source is present. An unconfigured lookup
    /// is never queried.
    fn is_configured(&self) -> bool {
        true
    }

    /// Look up the route between two free-text locations. `Ok(None)` means the
    /// service answered but had no route.
    fn lookup(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Option<RouteLookupResult>, LookupError>;
}

/// True when `api_key` is present and not the sample placeholder.
pub fn is_api_key_configured(api_key: &str) -> bool {
    let trimmed = api_key.trim();
    !trimmed.is_empty() && trimmed != PLACEHOLDER_API_KEY
}

// ---------------------------------------------------------------------------
// Disabled lookup
// ---------------------------------------------------------------------------

/// Lookup used when no credential is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledRouteLookup;

impl RouteLookup for DisabledRouteLookup {
    fn is_configured(&self) -> bool {
        false
    }

    fn lookup(
        &self,
        _origin: &str,
        _destination: &str,
    ) -> Result<Option<RouteLookupResult>, LookupError> {
        Err(LookupError::NotConfigured)
    }
}

// ---------------------------------------------------------------------------
// Table lookup
// ---------------------------------------------------------------------------

/// One row of a route table file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteTableEntry {
    pub origin: String,
    pub destination: String,
    #[serde(flatten)]
    pub route: RouteLookupResult,
}

/// Route table keyed by exact `(origin, destination)` strings.
#[derive(Debug, Default)]
pub struct TableRouteLookup {
    table: HashMap<(String, String), RouteLookupResult>,
}

impl TableRouteLookup {
    /// Load a JSON array of [`RouteTableEntry`] rows.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LookupError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|error| {
            LookupError::Malformed(format!(
                "failed to read route table '{}': {error}",
                path.display()
            ))
        })?;
        let entries: Vec<RouteTableEntry> = serde_json::from_str(&data).map_err(|error| {
            LookupError::Malformed(format!(
                "invalid route table '{}': {error}",
                path.display()
            ))
        })?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = RouteTableEntry>) -> Self {
        let table = entries
            .into_iter()
            .map(|entry| ((entry.origin, entry.destination), entry.route))
            .collect();
        Self { table }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl RouteLookup for TableRouteLookup {
    fn lookup(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Option<RouteLookupResult>, LookupError> {
        let key = (origin.to_string(), destination.to_string());
        Ok(self.table.get(&key).cloned())
    }
}

// ---------------------------------------------------------------------------
// Caching wrapper
// ---------------------------------------------------------------------------

/// LRU-cached wrapper around any [`RouteLookup`].
///
/// Cache key is `(origin, destination)` (directional). Only successful routes
/// are cached; misses and errors are retried on the next call.
pub struct CachedRouteLookup {
    inner: Box<dyn RouteLookup>,
    cache: Mutex<LruCache<(String, String), RouteLookupResult>>,
}

impl CachedRouteLookup {
    pub fn new(inner: Box<dyn RouteLookup>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }
}

impl RouteLookup for CachedRouteLookup {
    fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    fn lookup(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Option<RouteLookupResult>, LookupError> {
        let key = (origin.to_string(), destination.to_string());

        // Fast path: cache hit
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(cached) = cache.get(&key) {
                tracing::debug!(origin, destination, "route cache hit");
                return Ok(Some(cached.clone()));
            }
        }

        tracing::debug!(origin, destination, "route cache miss");
        let result = self.inner.lookup(origin, destination)?;

        if let Some(ref route) = result {
            if let Ok(mut cache) = self.cache.lock() {
                cache.put(key, route.clone());
            }
        }

        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Factory: build a lookup from RouteLookupKind
// ---------------------------------------------------------------------------

/// Construct a boxed [`RouteLookup`] from a [`RouteLookupKind`] descriptor.
///
/// - `Disabled` is returned without caching.
/// - Configured backends are wrapped in a [`CachedRouteLookup`]. A backend
///   that cannot be constructed degrades to `Disabled` with a warning.
pub fn build_route_lookup(kind: &RouteLookupKind, cache_capacity: usize) -> Box<dyn RouteLookup> {
    match kind {
        RouteLookupKind::Disabled => Box::new(DisabledRouteLookup),

        #[cfg(feature = "google-maps")]
        RouteLookupKind::GoogleMaps { api_key } => {
            if !is_api_key_configured(api_key) {
                tracing::debug!("maps API key missing or placeholder; using simulated distances");
                return Box::new(DisabledRouteLookup);
            }
            match google::GoogleMapsClient::new(api_key) {
                Ok(client) => Box::new(CachedRouteLookup::new(Box::new(client), cache_capacity)),
                Err(error) => {
                    tracing::warn!(%error, "failed to build maps client; using simulated distances");
                    Box::new(DisabledRouteLookup)
                }
            }
        }

        RouteLookupKind::Table { path } => match TableRouteLookup::from_file(path) {
            Ok(table) => Box::new(CachedRouteLookup::new(Box::new(table), cache_capacity)),
            Err(error) => {
                tracing::warn!(%error, path = %path, "failed to load route table; using simulated distances");
                Box::new(DisabledRouteLookup)
            }
        },
    }
}
