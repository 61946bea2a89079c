//! Leases: the capability returned by a successful acquire.
//!
//! A [`Lease`] pins the slot it was minted from — a pinned slot is never
//! selected by the eviction search, whatever its touch score. The lease
//! owns a strong reference to the slot's storage, so the value it exposes
//! stays valid even if a later `set` installs a new occupant at the same
//! array position, and even if the cache itself is dropped first.
//!
//! Releasing happens exactly once: either explicitly via
//! [`Lease::release`], which consumes the lease, or implicitly on drop.
//! A second release is unrepresentable — there is no lease left to call
//! it on — so the pin count can never underflow through this API.
//!
//! ## Example Usage
//!
//! ```
//! use clocksweep::cache::ClockSweepCache;
//!
//! let cache: ClockSweepCache<&str, String> = ClockSweepCache::new(4);
//! cache.set("page", "contents".to_string()).unwrap();
//!
//! let lease = cache.acquire(&"page").unwrap();
//! assert_eq!(lease.value(), "contents");
//!
//! // Explicit release; dropping the lease would do the same.
//! lease.release();
//! ```

use std::fmt;
use std::sync::Arc;

use crate::slot::Slot;

/// Exclusive, single-use handle to a cached value.
///
/// Created by [`ClockSweepCache::acquire`](crate::cache::ClockSweepCache::acquire).
/// Not clonable: one lease is one pin.
pub struct Lease<K, V> {
    slot: Arc<Slot<K, V>>,
}

impl<K, V> Lease<K, V> {
    pub(crate) fn new(slot: Arc<Slot<K, V>>) -> Self {
        Self { slot }
    }

    /// Borrows the stored value.
    ///
    /// This is the live slot storage, not a copy. It remains readable for
    /// the lifetime of the lease regardless of what happens to the array
    /// position the slot was found at.
    #[inline]
    pub fn value(&self) -> &V {
        &self.slot.value
    }

    /// Borrows the key the slot was created with.
    #[inline]
    pub fn key(&self) -> &K {
        &self.slot.key
    }

    /// Releases the lease, dropping its pin.
    ///
    /// Equivalent to dropping the lease; provided so call sites can make
    /// the hand-back explicit.
    #[inline]
    pub fn release(self) {}
}

impl<K, V> Drop for Lease<K, V> {
    fn drop(&mut self) {
        self.slot.release_pin();
    }
}

impl<K, V> fmt::Debug for Lease<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lease").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::SlotStats;

    fn pinned_slot() -> Arc<Slot<&'static str, i32>> {
        let slot = Arc::new(Slot::new("k", 7));
        slot.record_hit();
        slot
    }

    #[test]
    fn value_and_key_borrow_slot_storage() {
        let slot = pinned_slot();
        let lease = Lease::new(Arc::clone(&slot));
        assert_eq!(*lease.value(), 7);
        assert_eq!(*lease.key(), "k");
    }

    #[test]
    fn explicit_release_drops_exactly_one_pin() {
        let slot = pinned_slot();
        let lease = Lease::new(Arc::clone(&slot));
        lease.release();
        assert_eq!(slot.stats(), SlotStats { touch: 2, pins: 0 });
    }

    #[test]
    fn implicit_drop_behaves_like_release() {
        let slot = pinned_slot();
        {
            let _lease = Lease::new(Arc::clone(&slot));
            assert_eq!(slot.stats().pins, 1);
        }
        assert_eq!(slot.stats().pins, 0);
    }

    #[test]
    fn independent_leases_release_independently() {
        let slot = Arc::new(Slot::new("k", 7));
        slot.record_hit();
        slot.record_hit();
        let first = Lease::new(Arc::clone(&slot));
        let second = Lease::new(Arc::clone(&slot));
        assert_eq!(slot.stats().pins, 2);

        drop(first);
        assert_eq!(slot.stats().pins, 1);
        second.release();
        assert_eq!(slot.stats().pins, 0);
    }

    #[test]
    fn lease_keeps_slot_storage_alive() {
        let lease = {
            let slot = pinned_slot();
            Lease::new(slot)
        };
        assert_eq!(*lease.value(), 7);
    }
}
