//! clocksweep: fixed-capacity concurrent cache with clock-sweep eviction
//! and lease-based pinning.
//!
//! See [`cache::ClockSweepCache`] for the algorithm and its invariants.

pub mod cache;
pub mod error;
pub mod lease;
pub mod metrics;
pub mod prelude;

mod slot;

pub use slot::SlotStats;
