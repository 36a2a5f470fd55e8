//! Cached Builds Snapshot Module
//!
//! Defines the immutable result set published by the public builds cache.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use crate::models::PublicBuild;

// == Cached Builds Snapshot ==
/// Enriched public builds as of one refresh.
///
/// Serializes as `{"items": [...]}`; expiry metadata stays internal.
#[derive(Debug, Clone, Serialize)]
pub struct CachedBuildsSnapshot {
    /// Public builds with resolved creator names
    pub items: Vec<PublicBuild>,
    /// Instant after which the snapshot is stale
    #[serde(skip)]
    pub expires_at: Instant,
    /// Invalidation generation the refresh started in
    #[serde(skip)]
    pub(crate) generation: u64,
}

impl CachedBuildsSnapshot {
    // == Constructor ==
    /// Creates a snapshot expiring `ttl` from now.
    pub fn new(items: Vec<PublicBuild>, ttl: Duration, generation: u64) -> Self {
        Self {
            items,
            expires_at: Instant::now() + ttl,
            generation,
        }
    }

    /// An already-expired snapshot with no items.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            expires_at: Instant::now(),
            generation: 0,
        }
    }

    // == Is Expired ==
    /// Checks if the snapshot has expired.
    ///
    /// A snapshot is expired once the current time reaches `expires_at`.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
