//! Cache-level operation counters.
//!
//! Counters use `AtomicU64` with relaxed ordering for low-overhead
//! increments on the hot path; snapshots may reflect a slightly
//! inconsistent view across counters under high concurrency.
//!
//! ## Example Usage
//!
//! ```
//! use clocksweep::cache::ClockSweepCache;
//!
//! let cache: ClockSweepCache<u64, &str> = ClockSweepCache::new(2);
//! cache.set(1, "one").unwrap();
//! let _ = cache.acquire(&1).unwrap();
//! let _ = cache.acquire(&9);
//!
//! let m = cache.metrics();
//! assert_eq!(m.inserts, 1);
//! assert_eq!(m.hits, 1);
//! assert_eq!(m.misses, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of cache-level metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    /// Successful acquires.
    pub hits: u64,
    /// Acquires that scanned every slot without a match.
    pub misses: u64,
    /// Successful installs via `set()`.
    pub inserts: u64,
    /// Installs that displaced a live slot.
    pub evictions: u64,
    /// `set()` calls rejected with `CapacityExceeded`.
    pub rejections: u64,
}

/// Metrics counters shared by all cache operations.
#[derive(Debug, Default)]
pub(crate) struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    evictions: AtomicU64,
    rejections: AtomicU64,
}

impl CacheCounters {
    pub(crate) fn snapshot(&self) -> CacheMetrics {
        CacheMetrics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            rejections: self.rejections.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn inc_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_rejection(&self) {
        self.rejections.fetch_add(1, Ordering::Relaxed);
    }
}
