//! Clock-sweep cache with reference-counted pinning.
//!
//! Implements a second-chance eviction policy over a fixed slot array,
//! augmented with lease-based pinning: an entry currently held by a caller
//! is never evicted, whatever its recency score.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ClockSweepCache<K, V> Layout                       │
//! │                                                                         │
//! │   slots: Box<[RwLock<Option<Arc<Slot>>>]>     (fixed at construction)   │
//! │                                                                         │
//! │     [0]          [1]          [2]          [3]          [4]            │
//! │   ┌───────┐    ┌───────┐    ┌───────┐    ┌───────┐    ┌───────┐        │
//! │   │ key A │    │ key B │    │ empty │    │ key C │    │ key D │        │
//! │   │ t=2   │    │ t=0   │    │       │    │ t=-1  │    │ t=1   │        │
//! │   │ p=1   │    │ p=0   │    │       │    │ p=0   │    │ p=0   │        │
//! │   └───────┘    └───────┘    └───────┘    └───────┘    └───────┘        │
//! │      ▲            ▲                                                     │
//! │      │            └── evictable: touch == 0 AND pins == 0              │
//! │      └── pinned: a lease is outstanding, never selected                │
//! │                                                                         │
//! │   Two locks per position:                                               │
//! │     RwLock  — occupancy: which Slot (if any) lives at this index        │
//! │     Mutex   — the occupant's touch/pin counter pair (inside Slot)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm
//!
//! ```text
//! ACQUIRE(key):
//!   for i in 0..capacity:                // every slot, no early exit
//!     match slots[i]:
//!       empty          -> skip
//!       occupant == key -> touch += 1, pins += 1, remember occupant
//!       occupant != key -> touch -= 1    // aging, on every call
//!   remembered? return Lease : KeyNotFound
//!
//! SET(key, value):
//!   idx = first empty slot, else first with touch == 0 && pins == 0
//!   none eligible? return CapacityExceeded
//!   slots[idx] = Slot { key, value, touch: 1, pins: 0 }   // unconditional
//!
//! There is no retained clock hand: every call rescans from index 0, so a
//! single acquire ages all other live entries exactly once.
//! ```
//!
//! ## Core Operations
//!
//! | Operation    | Description                                | Complexity  |
//! |--------------|--------------------------------------------|-------------|
//! | `acquire`    | Full scan; pin match, age everything else  | O(capacity) |
//! | `set`        | Eviction search + unconditional install    | O(capacity) |
//! | `contains`   | Scan without touching any counter          | O(capacity) |
//! | `len`        | Count occupied positions                   | O(capacity) |
//! | `clear`      | Empty every position                       | O(capacity) |
//!
//! ## Trade-offs
//!
//! | Aspect      | This cache                     | Hash-indexed clock       |
//! |-------------|--------------------------------|--------------------------|
//! | Lookup      | O(capacity) linear scan        | O(1) map lookup          |
//! | Key bounds  | `Eq` only                      | `Eq + Hash`              |
//! | Aging       | Whole array per acquire        | Hand position per evict  |
//! | Eviction    | First eligible, left to right  | Hand order               |
//!
//! The linear scan is the point, not an oversight: aging every live entry
//! on every lookup and picking the leftmost eligible victim are observable
//! behavior, and switching to a hash index or a moving hand would change
//! both.
//!
//! ## Example Usage
//!
//! ```
//! use clocksweep::cache::ClockSweepCache;
//!
//! let cache: ClockSweepCache<u64, &str> = ClockSweepCache::new(2);
//!
//! cache.set(1, "one").unwrap();
//! cache.set(2, "two").unwrap();
//!
//! // Acquiring key 1 pins its slot and ages key 2's slot to zero.
//! let lease = cache.acquire(&1).unwrap();
//! assert_eq!(*lease.value(), "one");
//! drop(lease);
//!
//! // Key 2 is now evictable; the next install overwrites it in place.
//! cache.set(3, "three").unwrap();
//! assert!(!cache.contains(&2));
//! assert!(cache.contains(&1));
//! ```
//!
//! ## Thread Safety
//!
//! The cache is `Send + Sync` with no store-wide lock. Each position's
//! occupancy is guarded by its own `parking_lot::RwLock`, and each
//! occupant's counter pair by its own `parking_lot::Mutex`; locks are
//! taken singly and never nested across positions, so there is no
//! deadlock ordering to maintain and contention stays local to a key.
//!
//! A scan is **not** a consistent snapshot of the array: it locks and
//! unlocks one position at a time, so a concurrent `set` may replace a
//! slot the scan has already visited (or is about to visit). That
//! per-slot granularity is deliberate and kept.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{CacheError, ConfigError};
use crate::lease::Lease;
use crate::metrics::{CacheCounters, CacheMetrics};
use crate::slot::{Slot, SlotStats};

/// Fixed-capacity cache with clock-sweep eviction and pinned leases.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Eq`. No hashing or ordering is required —
///   lookup is a linear scan by design.
/// - `V`: Value type.
///
/// # Example
///
/// ```
/// use clocksweep::cache::ClockSweepCache;
///
/// let cache = ClockSweepCache::new(3);
/// cache.set("config", vec![1u8, 2, 3]).unwrap();
///
/// let lease = cache.acquire(&"config").unwrap();
/// assert_eq!(lease.value(), &[1, 2, 3]);
/// ```
pub struct ClockSweepCache<K, V> {
    slots: Box<[RwLock<Option<Arc<Slot<K, V>>>>]>,
    metrics: CacheCounters,
}

impl<K, V> ClockSweepCache<K, V>
where
    K: Eq,
{
    /// Creates a cache with the specified capacity.
    ///
    /// A capacity of zero is clamped to one; use [`try_new`](Self::try_new)
    /// to reject it instead.
    ///
    /// # Example
    ///
    /// ```
    /// use clocksweep::cache::ClockSweepCache;
    ///
    /// let cache: ClockSweepCache<String, i32> = ClockSweepCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::with_capacity(capacity.max(1))
    }

    /// Creates a cache, rejecting a zero capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use clocksweep::cache::ClockSweepCache;
    ///
    /// assert!(ClockSweepCache::<u64, u64>::try_new(0).is_err());
    /// assert!(ClockSweepCache::<u64, u64>::try_new(8).is_ok());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be > 0"));
        }
        Ok(Self::with_capacity(capacity))
    }

    fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| RwLock::new(None))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self {
            slots,
            metrics: CacheCounters::default(),
        }
    }

    /// Looks up `key`, pinning the matching slot and aging every other
    /// occupied slot.
    ///
    /// The scan visits every position in index order and does not stop at
    /// the first match, so one call ages all other live entries exactly
    /// once — hit or miss. On a hit the matching slot gets `touch += 1`
    /// and `pins += 1` as one atomic update, and the returned [`Lease`]
    /// holds the pin until it is released or dropped.
    ///
    /// If the same key occupies several positions (see [`set`](Self::set)),
    /// every matching slot is touched and pinned, and the lease addresses
    /// the last match; pins taken on earlier duplicates have no lease and
    /// are never dropped. This mirrors the permissiveness of `set` and is
    /// deliberate.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::KeyNotFound`] if no slot matched. Aging still
    /// applies to every slot visited.
    ///
    /// # Example
    ///
    /// ```
    /// use clocksweep::cache::ClockSweepCache;
    /// use clocksweep::error::CacheError;
    ///
    /// let cache: ClockSweepCache<u64, &str> = ClockSweepCache::new(4);
    /// cache.set(1, "one").unwrap();
    ///
    /// let lease = cache.acquire(&1).unwrap();
    /// assert_eq!(*lease.value(), "one");
    ///
    /// assert_eq!(cache.acquire(&2).unwrap_err(), CacheError::KeyNotFound);
    /// ```
    pub fn acquire(&self, key: &K) -> Result<Lease<K, V>, CacheError> {
        let mut matched: Option<Arc<Slot<K, V>>> = None;

        for cell in self.slots.iter() {
            let occupant = cell.read();
            let Some(slot) = occupant.as_ref() else {
                continue;
            };
            if slot.key == *key {
                slot.record_hit();
                matched = Some(Arc::clone(slot));
            } else {
                slot.age();
            }
        }

        match matched {
            Some(slot) => {
                self.metrics.inc_hit();
                Ok(Lease::new(slot))
            },
            None => {
                self.metrics.inc_miss();
                Err(CacheError::KeyNotFound)
            },
        }
    }

    /// Installs `key`/`value` in the first empty or evictable position.
    ///
    /// The new slot starts at `touch = 1, pins = 0` and unconditionally
    /// replaces whatever the eviction search selected. Leases minted from
    /// a displaced slot keep reading that slot's storage; they are
    /// detached from the array, not invalidated.
    ///
    /// No duplicate-key check is performed: calling `set` twice with the
    /// same key before eviction reclaims the first install leaves the key
    /// in two positions. Accepted quirk, not silently deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::CapacityExceeded`] if every position is
    /// pinned or carries a non-zero touch score; the store is unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use clocksweep::cache::ClockSweepCache;
    /// use clocksweep::error::CacheError;
    ///
    /// let cache: ClockSweepCache<u64, &str> = ClockSweepCache::new(1);
    /// cache.set(1, "one").unwrap();
    ///
    /// // The only slot was just installed (touch = 1): nothing is evictable.
    /// assert_eq!(cache.set(2, "two").unwrap_err(), CacheError::CapacityExceeded);
    /// ```
    pub fn set(&self, key: K, value: V) -> Result<(), CacheError> {
        let Some(index) = self.find_victim() else {
            self.metrics.inc_rejection();
            return Err(CacheError::CapacityExceeded);
        };

        let displaced = self.slots[index]
            .write()
            .replace(Arc::new(Slot::new(key, value)));
        if displaced.is_some() {
            self.metrics.inc_eviction();
        }
        self.metrics.inc_insert();
        Ok(())
    }

    /// Eviction search: first empty position, else first occupied position
    /// with a zero touch score and no pins.
    ///
    /// Strictly first-eligible, left to right, rescanning from index 0 on
    /// every call. Eligibility is read under the occupant's counter lock;
    /// the position itself is read-locked, so the occupant cannot be
    /// swapped out from under the check.
    fn find_victim(&self) -> Option<usize> {
        for (index, cell) in self.slots.iter().enumerate() {
            let occupant = cell.read();
            match occupant.as_ref() {
                None => return Some(index),
                Some(slot) if slot.is_evictable() => return Some(index),
                Some(_) => {},
            }
        }
        None
    }

    /// Returns `true` if any slot holds `key`.
    ///
    /// Unlike [`acquire`](Self::acquire), this touches no counter: it
    /// neither pins the match nor ages the rest.
    pub fn contains(&self, key: &K) -> bool {
        self.slots.iter().any(|cell| {
            cell.read()
                .as_ref()
                .map(|slot| slot.key == *key)
                .unwrap_or(false)
        })
    }

    /// Returns the number of occupied positions.
    ///
    /// Counts under per-position locks taken one at a time; under
    /// concurrency the total may be stale by the time it is returned.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|cell| cell.read().is_some())
            .count()
    }

    /// Returns `true` if no position is occupied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fixed capacity chosen at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Empties every position.
    ///
    /// Outstanding leases keep their slot's storage alive and readable;
    /// only the array positions are vacated.
    pub fn clear(&self) {
        for cell in self.slots.iter() {
            *cell.write() = None;
        }
    }

    /// Returns a counter snapshot for the slot at `index`, or `None` if
    /// the index is out of range or the position is empty.
    ///
    /// Diagnostic view; under concurrency the counters may have moved by
    /// the time the snapshot is inspected.
    ///
    /// # Example
    ///
    /// ```
    /// use clocksweep::cache::ClockSweepCache;
    ///
    /// let cache: ClockSweepCache<u64, &str> = ClockSweepCache::new(2);
    /// cache.set(1, "one").unwrap();
    ///
    /// let stats = cache.slot_stats(0).unwrap();
    /// assert_eq!(stats.touch, 1);
    /// assert_eq!(stats.pins, 0);
    /// assert!(cache.slot_stats(1).is_none());
    /// ```
    pub fn slot_stats(&self, index: usize) -> Option<SlotStats> {
        let cell = self.slots.get(index)?;
        let occupant = cell.read();
        occupant.as_ref().map(|slot| slot.stats())
    }

    /// Returns a snapshot of the cache's operation counters.
    pub fn metrics(&self) -> CacheMetrics {
        self.metrics.snapshot()
    }
}

impl<K, V> fmt::Debug for ClockSweepCache<K, V>
where
    K: Eq,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockSweepCache")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
