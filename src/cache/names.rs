//! Creator Name Cache Module
//!
//! Per-username TTL cache in front of the identity provider's batched name lookup.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::identity::UserDirectory;

/// Largest batch the identity provider accepts per lookup.
pub const DEFAULT_BATCH_SIZE: usize = 60;

#[derive(Debug, Clone)]
struct NameEntry {
    name: String,
    expires_at: Instant,
}

impl NameEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

// == User Name Cache ==
/// Resolves usernames to display names, caching each result for `ttl`.
///
/// Usernames the directory does not know fall back to the username itself,
/// and that fallback is cached like any other name. A batch that fails
/// outright also falls back, but nothing from it is cached.
pub struct UserNameCache {
    directory: Arc<dyn UserDirectory>,
    entries: Mutex<HashMap<String, NameEntry>>,
    ttl: Duration,
    batch_size: usize,
}

impl UserNameCache {
    // == Constructor ==
    /// # Arguments
    /// * `directory` - Identity provider lookup
    /// * `ttl` - Lifetime of a resolved name
    /// * `batch_size` - Maximum usernames per lookup call
    pub fn new(directory: Arc<dyn UserDirectory>, ttl: Duration, batch_size: usize) -> Self {
        Self {
            directory,
            entries: Mutex::new(HashMap::new()),
            ttl,
            batch_size: batch_size.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, NameEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Resolve ==
    /// Resolves every distinct username in `usernames`.
    ///
    /// Cached names are served without I/O; the remainder is fetched in
    /// batches of at most `batch_size`. Every input username is present in
    /// the result.
    pub async fn resolve(&self, usernames: &[String]) -> HashMap<String, String> {
        let mut resolved = HashMap::new();
        let mut pending = Vec::new();

        {
            let now = Instant::now();
            let entries = self.lock();
            let mut seen = HashSet::new();
            for username in usernames {
                if !seen.insert(username.as_str()) {
                    continue;
                }
                match entries.get(username) {
                    Some(entry) if !entry.is_expired(now) => {
                        resolved.insert(username.clone(), entry.name.clone());
                    }
                    _ => pending.push(username.clone()),
                }
            }
        }

        if pending.is_empty() {
            return resolved;
        }

        debug!(
            cached = resolved.len(),
            fetching = pending.len(),
            "Resolving creator names"
        );

        for batch in pending.chunks(self.batch_size) {
            let found = match self.directory.lookup_names(batch).await {
                Ok(found) => found,
                Err(err) => {
                    warn!(error = %err, batch = batch.len(), "Name lookup failed; using usernames");
                    resolved.extend(batch.iter().map(|u| (u.clone(), u.clone())));
                    continue;
                }
            };
            let expires_at = Instant::now() + self.ttl;

            let mut entries = self.lock();
            for username in batch {
                let name = found
                    .get(username)
                    .cloned()
                    .unwrap_or_else(|| username.clone());
                entries.insert(
                    username.clone(),
                    NameEntry {
                        name: name.clone(),
                        expires_at,
                    },
                );
                resolved.insert(username.clone(), name);
            }
        }

        resolved
    }

    // == Prune Expired ==
    /// Removes all expired names.
    ///
    /// Returns the number of entries removed.
    pub fn prune_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Forgets one username so the next lookup asks the directory.
    pub fn evict(&self, username: &str) -> bool {
        self.lock().remove(username).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
