//! Stub collaborators for cache tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::identity::{IdentityError, IdentityResult, UserDirectory};
use crate::models::Build;
use crate::store::{PublicBuildSource, StoreError, StoreResult};

pub(crate) fn build(id: &str, creator: &str, display: bool) -> Build {
    let mut build = Build::new(format!("sub-{creator}"), creator, "Ahri");
    build.id = id.to_string();
    build.display = display;
    build
}

/// Source returning its builds verbatim, public or not.
#[derive(Default)]
pub(crate) struct StubSource {
    builds: Mutex<Vec<Build>>,
    queries: AtomicUsize,
    failing: AtomicBool,
    delay: Mutex<Option<Duration>>,
    hold: AtomicBool,
    pub entered: Notify,
    pub release: Notify,
}

impl StubSource {
    pub fn with_builds(builds: Vec<Build>) -> Self {
        Self {
            builds: Mutex::new(builds),
            ..Default::default()
        }
    }

    pub fn set_builds(&self, builds: Vec<Build>) {
        *self.builds.lock().unwrap() = builds;
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Makes the next queries signal `entered` and wait for `release`.
    pub fn set_hold(&self, hold: bool) {
        self.hold.store(hold, Ordering::SeqCst);
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PublicBuildSource for StubSource {
    async fn query_public_builds(&self) -> StoreResult<Vec<Build>> {
        self.queries.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.hold.load(Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("stub outage".into()));
        }
        Ok(self.builds.lock().unwrap().clone())
    }
}

/// Directory resolving a fixed set of names.
#[derive(Default)]
pub(crate) struct StubDirectory {
    names: HashMap<String, String>,
    calls: AtomicUsize,
    requested: Mutex<Vec<Vec<String>>>,
    failing: AtomicBool,
    /// Batches containing this username fail
    poisoned: Mutex<Option<String>>,
}

impl StubDirectory {
    pub fn with_names(names: &[(&str, &str)]) -> Self {
        Self {
            names: names
                .iter()
                .map(|(u, n)| (u.to_string(), n.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Fails only the batches that contain `username`.
    pub fn fail_batches_with(&self, username: &str) {
        *self.poisoned.lock().unwrap() = Some(username.to_string());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every batch passed to `lookup_names`, in call order.
    pub fn requested(&self) -> Vec<Vec<String>> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserDirectory for StubDirectory {
    async fn lookup_names(&self, usernames: &[String]) -> IdentityResult<HashMap<String, String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(usernames.to_vec());

        let poisoned = self
            .poisoned
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|bad| usernames.contains(bad));
        if poisoned || self.failing.load(Ordering::SeqCst) {
            return Err(IdentityError::Unavailable("stub outage".into()));
        }
        Ok(usernames
            .iter()
            .filter_map(|u| self.names.get(u).map(|n| (u.clone(), n.clone())))
            .collect())
    }
}
