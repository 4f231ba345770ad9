//! Runtime configuration: credentials, store location, RNG seed and pricing.

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::counters::{JsonFileCounterStore, COUNTERS_FILE_NAME};
use crate::error::ConfigError;
use crate::places::{DisabledPlaceSuggester, PlaceSuggester, DEFAULT_COUNTRY};
use crate::pricing::PricingConfig;
use crate::routing::{
    build_route_lookup, is_api_key_configured, RouteLookup, RouteLookupKind,
    DEFAULT_ROUTE_CACHE_CAPACITY,
};

/// Environment variable holding the maps API key.
pub const MAPS_API_KEY_ENV: &str = "RIDE_COMPARE_MAPS_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Maps API key. Empty or placeholder means simulated distances only.
    pub maps_api_key: Option<String>,
    /// JSON route table used when no API key is configured.
    pub route_table: Option<String>,
    /// Country restriction for place suggestions.
    pub country: String,
    pub counters_path: PathBuf,
    /// Fixed RNG seed for reproducible fares; random when unset.
    pub seed: Option<u64>,
    pub route_cache_capacity: usize,
    pub pricing: PricingConfig,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            maps_api_key: None,
            route_table: None,
            country: DEFAULT_COUNTRY.to_string(),
            counters_path: PathBuf::from(COUNTERS_FILE_NAME),
            seed: None,
            route_cache_capacity: DEFAULT_ROUTE_CACHE_CAPACITY,
            pricing: PricingConfig::default(),
        }
    }
}

impl CompareConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Take the API key from [`MAPS_API_KEY_ENV`] when it is set.
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(MAPS_API_KEY_ENV) {
            Ok(key) => self.with_maps_api_key(key),
            Err(_) => self,
        }
    }

    pub fn with_maps_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.maps_api_key = Some(api_key.into());
        self
    }

    pub fn with_route_table(mut self, path: impl Into<String>) -> Self {
        self.route_table = Some(path.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_counters_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.counters_path = path.into();
        self
    }

    pub fn is_maps_configured(&self) -> bool {
        self.configured_api_key().is_some()
    }

    fn configured_api_key(&self) -> Option<&str> {
        self.maps_api_key
            .as_deref()
            .filter(|key| is_api_key_configured(key))
    }

    /// Which route backend this config selects: maps when a real key is
    /// present (and the feature is built), then a route table, else disabled.
    pub fn route_lookup_kind(&self) -> RouteLookupKind {
        #[cfg(feature = "google-maps")]
        {
            if let Some(api_key) = self.configured_api_key() {
                return RouteLookupKind::GoogleMaps {
                    api_key: api_key.to_string(),
                };
            }
        }
        match &self.route_table {
            Some(path) => RouteLookupKind::Table { path: path.clone() },
            None => RouteLookupKind::Disabled,
        }
    }

    pub fn build_route_lookup(&self) -> Box<dyn RouteLookup> {
        build_route_lookup(&self.route_lookup_kind(), self.route_cache_capacity)
    }

    pub fn build_place_suggester(&self) -> Box<dyn PlaceSuggester> {
        #[cfg(feature = "google-maps")]
        {
            if let Some(api_key) = self.configured_api_key() {
                match crate::routing::google::GoogleMapsClient::new(api_key) {
                    Ok(client) => return Box::new(client),
                    Err(error) => {
                        tracing::warn!(%error, "failed to build maps client; suggestions disabled")
                    }
                }
            }
        }
        Box::new(DisabledPlaceSuggester)
    }

    pub fn counter_store(&self) -> JsonFileCounterStore {
        JsonFileCounterStore::new(&self.counters_path)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
