//! Public Builds Cache Module
//!
//! Single-slot, time-bounded memoization of the public builds listing,
//! enriched with creator display names.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::cache::{BuildChange, CacheStats, CachedBuildsSnapshot, StatsCounters, UserNameCache};
use crate::models::{Build, PublicBuild};
use crate::store::{PublicBuildSource, StoreError};

/// Default snapshot lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(120);

/// Default upper bound for one refresh.
pub const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(10);

// == Refresh Error ==
/// Why a refresh produced no snapshot. Never escapes the cache.
///
/// Name lookup failures are not among them: creators fall back to their
/// username instead.
#[derive(Error, Debug)]
pub enum RefreshError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Refresh timed out after {0:?}")]
    TimedOut(Duration),
}

// == Public Builds Cache ==
/// Serves the public builds listing from one shared snapshot.
///
/// A snapshot is valid while unexpired and while no invalidation happened
/// after its refresh started. Readers get an `Arc` to a complete snapshot;
/// publishing a new one is a single pointer swap.
pub struct PublicBuildsCache {
    source: Arc<dyn PublicBuildSource>,
    names: Arc<UserNameCache>,
    slot: ArcSwapOption<CachedBuildsSnapshot>,
    /// Bumped by every invalidation
    generation: AtomicU64,
    /// Present when concurrent refreshes are coalesced
    refresh_gate: Option<Mutex<()>>,
    ttl: Duration,
    refresh_timeout: Duration,
    stats: StatsCounters,
}

impl PublicBuildsCache {
    // == Constructor ==
    /// Creates an empty cache with single-flight refreshes enabled.
    ///
    /// # Arguments
    /// * `source` - Store query returning public builds
    /// * `names` - Creator display name resolver
    /// * `ttl` - Snapshot lifetime
    pub fn new(source: Arc<dyn PublicBuildSource>, names: Arc<UserNameCache>, ttl: Duration) -> Self {
        Self {
            source,
            names,
            slot: ArcSwapOption::empty(),
            generation: AtomicU64::new(0),
            refresh_gate: Some(Mutex::new(())),
            ttl,
            refresh_timeout: DEFAULT_REFRESH_TIMEOUT,
            stats: StatsCounters::default(),
        }
    }

    /// Enables or disables coalescing of concurrent refreshes.
    ///
    /// When disabled every concurrent miss refreshes on its own and the last
    /// one to finish wins the slot.
    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.refresh_gate = enabled.then(|| Mutex::new(()));
        self
    }

    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    // == Get Public Builds ==
    /// Returns the current snapshot, refreshing it when absent or stale.
    ///
    /// Never fails: a refresh error yields an empty, unpublished snapshot and
    /// the next call retries.
    pub async fn get_public_builds(&self) -> Arc<CachedBuildsSnapshot> {
        if let Some(snapshot) = self.current() {
            self.stats.record_hit();
            debug!(items = snapshot.len(), "Public builds cache hit");
            return snapshot;
        }
        self.stats.record_miss();

        let _gate = match &self.refresh_gate {
            Some(gate) => {
                let guard = gate.lock().await;
                // Another caller may have refreshed while we waited
                if let Some(snapshot) = self.current() {
                    debug!("Public builds refreshed by a concurrent caller");
                    return snapshot;
                }
                Some(guard)
            }
            None => None,
        };

        let generation = self.generation.load(Ordering::Acquire);
        debug!(generation, "Refreshing public builds");

        let refreshed = match tokio::time::timeout(self.refresh_timeout, self.refresh(generation)).await {
            Ok(result) => result,
            Err(_) => Err(RefreshError::TimedOut(self.refresh_timeout)),
        };

        match refreshed {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.slot.store(Some(Arc::clone(&snapshot)));
                self.stats.record_refresh();
                info!(items = snapshot.len(), "Public builds cache refreshed");
                snapshot
            }
            Err(err) => {
                self.stats.record_refresh_failure();
                error!(error = %err, "Public builds refresh failed; serving empty list");
                Arc::new(CachedBuildsSnapshot::empty())
            }
        }
    }

    /// Queries the store and resolves creator names into a new snapshot.
    async fn refresh(&self, generation: u64) -> Result<CachedBuildsSnapshot, RefreshError> {
        let builds: Vec<Build> = self
            .source
            .query_public_builds()
            .await?
            .into_iter()
            .filter(|build| build.display)
            .collect();

        let creators: Vec<String> = {
            let mut seen = HashSet::new();
            builds
                .iter()
                .filter(|build| seen.insert(build.creator.as_str()))
                .map(|build| build.creator.clone())
                .collect()
        };

        let names = self.names.resolve(&creators).await;

        let items = builds
            .into_iter()
            .map(|build| {
                let creator_name = names
                    .get(&build.creator)
                    .cloned()
                    .unwrap_or_else(|| build.creator.clone());
                PublicBuild {
                    build,
                    creator_name,
                }
            })
            .collect();

        Ok(CachedBuildsSnapshot::new(items, self.ttl, generation))
    }

    /// The published snapshot if it is still valid.
    fn current(&self) -> Option<Arc<CachedBuildsSnapshot>> {
        let snapshot = self.slot.load_full()?;
        let fresh = snapshot.generation == self.generation.load(Ordering::Acquire)
            && !snapshot.is_expired();
        fresh.then_some(snapshot)
    }

    // == Invalidate ==
    /// Discards the current snapshot; the next read refreshes.
    ///
    /// Idempotent. A refresh already in flight still answers its own caller
    /// but its snapshot is never served to anyone else.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.slot.store(None);
        self.stats.record_invalidation();
        info!("Public builds cache invalidated");
    }

    /// Invalidates if `change` can alter the public listing.
    pub fn observe(&self, change: BuildChange) {
        if change.affects_public_listing() {
            self.invalidate();
        } else {
            debug!(?change, "Build change does not affect public listing");
        }
    }

    /// True while a valid snapshot is held.
    pub fn is_valid(&self) -> bool {
        self.current().is_some()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.snapshot();
        if let Some(snapshot) = self.current() {
            stats.cached_items = snapshot.len();
            stats.expires_in_ms = snapshot.ttl_remaining().as_millis() as u64;
        }
        stats
    }
}
