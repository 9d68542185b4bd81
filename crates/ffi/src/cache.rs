//! Content-addressed quote cache.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;

use cutquote_cost::Material;

use crate::types::QuoteReport;

/// Default number of cached reports.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Cache key: drawing content digest, material, and the exact thickness bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuoteKey {
    pub digest: u64,
    pub material: Material,
    pub thickness_bits: u64,
}

impl QuoteKey {
    pub fn new(digest: u64, material: Material, thickness: f64) -> Self {
        Self {
            digest,
            material,
            thickness_bits: thickness.to_bits(),
        }
    }
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<QuoteKey, QuoteReport>,
    order: VecDeque<QuoteKey>,
    hits: u64,
    misses: u64,
}

/// Bounded report cache with first-in first-out eviction.
#[derive(Debug)]
pub struct QuoteCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl QuoteCache {
    /// Creates a cache holding at most `capacity` reports. Zero disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(CacheInner::default()),
        }
    }

    /// Returns a copy of the cached report for `key`.
    pub fn get(&self, key: &QuoteKey) -> Option<QuoteReport> {
        let mut inner = self.inner.lock();
        let found = inner.entries.get(key).cloned();
        if found.is_some() {
            inner.hits += 1;
        } else {
            inner.misses += 1;
        }
        found
    }

    /// Stores a report, evicting the oldest entry when full.
    pub fn insert(&self, key: QuoteKey, report: QuoteReport) {
        if self.capacity == 0 {
            return;
        }
        let mut inner = self.inner.lock();
        if inner.entries.insert(key, report).is_some() {
            return;
        }
        inner.order.push_back(key);
        while inner.order.len() > self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
                log::debug!("evicted cached quote {:016x}", oldest.digest);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// (hits, misses) since creation or the last clear.
    pub fn stats(&self) -> (u64, u64) {
        let inner = self.inner.lock();
        (inner.hits, inner.misses)
    }

    pub fn clear(&self) {
        *self.inner.lock() = CacheInner::default();
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
