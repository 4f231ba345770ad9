//! Engagement counters persisted in a local key-value store.
//!
//! Values are stored as stringified decimal integers, one per key. Counters
//! only ever grow; a missing or unreadable value reads as zero.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::error::CounterStoreError;

/// Default file name for the JSON counter store.
pub const COUNTERS_FILE_NAME: &str = "ridecompare_counters.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CounterKey {
    #[serde(rename = "comparisonsMade")]
    ComparisonsMade,
    #[serde(rename = "ridesCompared")]
    RidesCompared,
    #[serde(rename = "totalSavings")]
    TotalSavings,
}

impl CounterKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ComparisonsMade => "comparisonsMade",
            Self::RidesCompared => "ridesCompared",
            Self::TotalSavings => "totalSavings",
        }
    }
}

impl fmt::Display for CounterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monotonic counter storage.
pub trait CounterStore: Send + Sync {
    /// Current value, zero when absent.
    fn get(&self, key: CounterKey) -> u64;

    /// Apply every delta in a single write and return all counters
    /// afterwards. Either every delta lands or none does.
    fn increment_many(
        &self,
        deltas: &[(CounterKey, u64)],
    ) -> Result<CounterSnapshot, CounterStoreError>;

    /// Add `by` to the counter and return the new value.
    fn increment(&self, key: CounterKey, by: u64) -> Result<u64, CounterStoreError> {
        self.increment_many(&[(key, by)])
            .map(|snapshot| snapshot.get(key))
    }
}

/// Snapshot of all counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CounterSnapshot {
    pub comparisons_made: u64,
    pub rides_compared: u64,
    pub total_savings: u64,
}

impl CounterSnapshot {
    pub fn read(store: &dyn CounterStore) -> Self {
        Self::from_fn(|key| store.get(key))
    }

    pub fn get(&self, key: CounterKey) -> u64 {
        match key {
            CounterKey::ComparisonsMade => self.comparisons_made,
            CounterKey::RidesCompared => self.rides_compared,
            CounterKey::TotalSavings => self.total_savings,
        }
    }

    fn from_fn(mut value: impl FnMut(CounterKey) -> u64) -> Self {
        Self {
            comparisons_made: value(CounterKey::ComparisonsMade),
            rides_compared: value(CounterKey::RidesCompared),
            total_savings: value(CounterKey::TotalSavings),
        }
    }
}

fn parse_counter(key: CounterKey, raw: &str) -> u64 {
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(%key, value = raw, "ignoring unparsable counter value");
        0
    })
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
    values: Mutex<HashMap<CounterKey, u64>>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for InMemoryCounterStore {
    fn get(&self, key: CounterKey) -> u64 {
        self.values
            .lock()
            .map(|values| values.get(&key).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    fn increment_many(
        &self,
        deltas: &[(CounterKey, u64)],
    ) -> Result<CounterSnapshot, CounterStoreError> {
        let mut values = self.values.lock().map_err(|_| CounterStoreError::Poisoned)?;
        for &(key, by) in deltas {
            let entry = values.entry(key).or_insert(0);
            *entry = entry.saturating_add(by);
        }
        Ok(CounterSnapshot::from_fn(|key| {
            values.get(&key).copied().unwrap_or(0)
        }))
    }
}

// ---------------------------------------------------------------------------
// JSON file store
// ---------------------------------------------------------------------------

/// Counters kept in a single JSON object of `"key": "decimal"` pairs.
///
/// The file is re-read on every access, so handles sharing a path see each
/// other's increments. Increments hold an exclusive advisory lock on a
/// sibling `.lock` file for the whole read-modify-write, and the write itself
/// goes through a temp file and a rename.
#[derive(Debug)]
pub struct JsonFileCounterStore {
    path: PathBuf,
}

impl JsonFileCounterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn ensure_parent(&self) -> Result<(), CounterStoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|source| CounterStoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }

    /// Blocks until this process holds the lock file. The lock is released
    /// when the returned handle is dropped.
    fn acquire_lock(&self) -> Result<File, CounterStoreError> {
        self.ensure_parent()?;
        let lock_path = self.lock_path();
        let io_err = |source: std::io::Error| CounterStoreError::Io {
            path: lock_path.clone(),
            source,
        };
        let lock = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(io_err)?;
        lock.lock_exclusive().map_err(io_err)?;
        Ok(lock)
    }

    fn load(&self) -> Result<BTreeMap<String, String>, CounterStoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new())
            }
            Err(source) => {
                return Err(CounterStoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_str(&contents) {
            Ok(values) => Ok(values),
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "counter file is corrupt; starting from zero");
                Ok(BTreeMap::new())
            }
        }
    }

    fn save_atomic(&self, values: &BTreeMap<String, String>) -> Result<(), CounterStoreError> {
        let serialized = serde_json::to_string_pretty(values)?;

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_nanos())
            .unwrap_or(0);
        let temp_path = self.path.with_extension(format!("json.tmp.{nanos}"));
        let io_err = |source: std::io::Error| CounterStoreError::Io {
            path: temp_path.clone(),
            source,
        };

        let mut temp_file = File::create(&temp_path).map_err(io_err)?;
        temp_file
            .write_all(serialized.as_bytes())
            .map_err(io_err)?;
        temp_file.sync_all().map_err(io_err)?;

        fs::rename(&temp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            CounterStoreError::Io {
                path: self.path.clone(),
                source,
            }
        })
    }
}

impl CounterStore for JsonFileCounterStore {
    fn get(&self, key: CounterKey) -> u64 {
        match self.load() {
            Ok(values) => values
                .get(key.as_str())
                .map(|raw| parse_counter(key, raw))
                .unwrap_or(0),
            Err(error) => {
                tracing::warn!(%error, %key, "failed to read counter");
                0
            }
        }
    }

    fn increment_many(
        &self,
        deltas: &[(CounterKey, u64)],
    ) -> Result<CounterSnapshot, CounterStoreError> {
        let _lock = self.acquire_lock()?;

        let mut values = self.load()?;
        for &(key, by) in deltas {
            let current = values
                .get(key.as_str())
                .map(|raw| parse_counter(key, raw))
                .unwrap_or(0);
            values.insert(key.as_str().to_string(), current.saturating_add(by).to_string());
        }
        self.save_atomic(&values)?;

        Ok(CounterSnapshot::from_fn(|key| {
            values
                .get(key.as_str())
                .map(|raw| parse_counter(key, raw))
                .unwrap_or(0)
        }))
    }
}
