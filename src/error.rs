//! Error types for the clocksweep library.
//!
//! ## Key Components
//!
//! - [`CacheError`]: Returned by cache operations — a failed lookup
//!   ([`CacheError::KeyNotFound`]) or a full store
//!   ([`CacheError::CapacityExceeded`]).
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (zero capacity).
//!
//! ## Example Usage
//!
//! ```
//! use clocksweep::cache::ClockSweepCache;
//! use clocksweep::error::{CacheError, ConfigError};
//!
//! // Fallible constructor for user-configurable parameters
//! let cache: Result<ClockSweepCache<String, i32>, ConfigError> =
//!     ClockSweepCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = ClockSweepCache::<String, i32>::try_new(0);
//! assert!(bad.is_err());
//!
//! // A miss is an ordinary, typed outcome
//! let cache = ClockSweepCache::<u64, u64>::new(4);
//! assert_eq!(cache.acquire(&7).unwrap_err(), CacheError::KeyNotFound);
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Error returned by cache operations.
///
/// Both variants are expected, recoverable outcomes rather than faults:
/// a miss is typically followed by a populate, and a full store by a retry
/// once outstanding leases are released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// The acquire scan visited every slot without finding the key.
    ///
    /// Aging was still applied to every occupied slot during the scan.
    KeyNotFound,
    /// The eviction search found no empty or evictable slot: every position
    /// is either pinned or carries a non-zero touch score. The store is
    /// left unchanged.
    CapacityExceeded,
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::KeyNotFound => f.write_str("key not found"),
            CacheError::CapacityExceeded => f.write_str("capacity exceeded"),
        }
    }
}

impl std::error::Error for CacheError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`ClockSweepCache::try_new`](crate::cache::ClockSweepCache::try_new).
/// Carries a human-readable description of which parameter failed
/// validation.
///
/// # Example
///
/// ```
/// use clocksweep::cache::ClockSweepCache;
///
/// let err = ClockSweepCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
