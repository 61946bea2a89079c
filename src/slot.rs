//! One storage cell of the sweep array: a key/value pair plus its
//! touch/pin counter pair, guarded as a unit by a per-slot mutex.
//!
//! The counters move together under one lock so a scan never observes a
//! half-applied hit (touch bumped, pin not yet). The key and value are
//! written once at construction and read without locking thereafter.

use parking_lot::Mutex;

/// Counter pair for one slot, always mutated under the slot's mutex.
///
/// `touch` is signed: repeated misses age a slot below zero, and the
/// eviction search requires *exactly* zero, so an over-aged slot is
/// shielded until a later hit-and-age cycle brings it back.
#[derive(Debug)]
pub(crate) struct SlotCounters {
    pub(crate) touch: i64,
    pub(crate) pins: u32,
}

/// Point-in-time copy of one slot's counters.
///
/// Diagnostic view returned by
/// [`ClockSweepCache::slot_stats`](crate::cache::ClockSweepCache::slot_stats);
/// under concurrency it may be stale by the time it is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotStats {
    /// Recency score: incremented on a hit, decremented when the slot is
    /// passed over by a scan for a different key.
    pub touch: i64,
    /// Outstanding leases against this slot.
    pub pins: u32,
}

/// A single occupied cell: write-once key/value plus locked counters.
#[derive(Debug)]
pub(crate) struct Slot<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    counters: Mutex<SlotCounters>,
}

impl<K, V> Slot<K, V> {
    /// Creates a freshly installed slot: one touch, no pins.
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            counters: Mutex::new(SlotCounters { touch: 1, pins: 0 }),
        }
    }

    /// Records a successful targeted lookup: bumps the touch score and
    /// takes a pin, atomically with respect to other counter updates.
    pub(crate) fn record_hit(&self) {
        let mut counters = self.counters.lock();
        counters.touch += 1;
        counters.pins += 1;
    }

    /// Ages the slot: a scan for a different key passed it over.
    pub(crate) fn age(&self) {
        self.counters.lock().touch -= 1;
    }

    /// Drops one pin. Callers hold a pin taken by [`Slot::record_hit`],
    /// so the count is at least one here.
    pub(crate) fn release_pin(&self) {
        let mut counters = self.counters.lock();
        debug_assert!(counters.pins > 0, "pin released without a lease");
        counters.pins -= 1;
    }

    /// Whether the eviction search may select this slot right now:
    /// touch score exactly zero and no outstanding pins.
    pub(crate) fn is_evictable(&self) -> bool {
        let counters = self.counters.lock();
        counters.touch == 0 && counters.pins == 0
    }

    /// Copies out the current counter pair.
    pub(crate) fn stats(&self) -> SlotStats {
        let counters = self.counters.lock();
        SlotStats {
            touch: counters.touch,
            pins: counters.pins,
        }
    }
}
