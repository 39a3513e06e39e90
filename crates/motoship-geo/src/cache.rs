//! Process-lifetime cache of resolved pincodes.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::types::GeocodeResult;

/// Pincode → resolved coordinates, populated lazily.
///
/// Lives as long as the process; never evicted, never persisted, rebuilt
/// from scratch on restart. Safe for concurrent read/insert: the first
/// writer for a key wins, and concurrent duplicate resolutions produce
/// equivalent entries so the race is harmless.
#[derive(Debug, Default)]
pub struct PincodeCache {
    entries: Mutex<HashMap<String, GeocodeResult>>,
}

impl PincodeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for a normalized pincode, if any.
    #[must_use]
    pub fn get(&self, pincode: &str) -> Option<GeocodeResult> {
        self.entries
            .lock()
            .expect("pincode cache poisoned")
            .get(pincode)
            .cloned()
    }

    /// Stores a resolution. The first write for a key wins; later writes
    /// for the same key are ignored.
    pub fn insert(&self, pincode: &str, result: GeocodeResult) {
        self.entries
            .lock()
            .expect("pincode cache poisoned")
            .entry(pincode.to_string())
            .or_insert(result);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().expect("pincode cache poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
