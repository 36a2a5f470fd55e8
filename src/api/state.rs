//! Application state shared across all handlers.

use std::sync::Arc;

use crate::cache::{PublicBuildsCache, UserNameCache};
use crate::config::Config;
use crate::identity::{TokenVerifier, UserDirectory, UserProfiles};
use crate::store::{BuildStore, CommentStore};

/// Collaborators and caches handed to every handler.
///
/// Built once at the composition root; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub builds: Arc<dyn BuildStore>,
    pub comments: Arc<dyn CommentStore>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub directory: Arc<dyn UserDirectory>,
    pub profiles: Arc<dyn UserProfiles>,
    /// Creator display names
    pub names: Arc<UserNameCache>,
    /// Public builds listing
    pub public_builds: Arc<PublicBuildsCache>,
}

impl AppState {
    /// Wires a store and an identity provider into the caches described by `config`.
    pub fn new<S, I>(config: &Config, store: Arc<S>, identity: Arc<I>) -> Self
    where
        S: BuildStore + CommentStore + 'static,
        I: TokenVerifier + UserDirectory + UserProfiles + 'static,
    {
        let directory: Arc<dyn UserDirectory> = identity.clone();
        let names = Arc::new(UserNameCache::new(
            directory.clone(),
            config.user_name_ttl(),
            config.name_lookup_batch_size,
        ));
        let public_builds = Arc::new(
            PublicBuildsCache::new(store.clone(), names.clone(), config.public_builds_ttl())
                .with_single_flight(config.single_flight_refresh)
                .with_refresh_timeout(config.refresh_timeout()),
        );

        Self {
            builds: store.clone(),
            comments: store,
            verifier: identity.clone(),
            directory,
            profiles: identity,
            names,
            public_builds,
        }
    }
}
