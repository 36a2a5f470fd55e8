//! Cache Module
//!
//! Time-bounded caching of the public builds listing and of creator display names.

mod change;
mod names;
mod public_builds;
mod snapshot;
mod stats;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export public types
pub use change::BuildChange;
pub use names::{UserNameCache, DEFAULT_BATCH_SIZE};
pub use public_builds::{PublicBuildsCache, DEFAULT_REFRESH_TIMEOUT, DEFAULT_TTL};
pub use snapshot::CachedBuildsSnapshot;
pub use stats::CacheStats;

pub(crate) use stats::StatsCounters;
