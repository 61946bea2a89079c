pub use crate::cache::ClockSweepCache;
pub use crate::error::{CacheError, ConfigError};
pub use crate::lease::Lease;
pub use crate::metrics::CacheMetrics;
pub use crate::slot::SlotStats;
