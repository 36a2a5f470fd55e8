//! Identity Module
//!
//! Contracts for the managed identity provider: bearer token verification,
//! batched display-name lookup and profile edits.

mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::{InMemoryIdentity, UserRecord};

/// Group granting access to the admin routes.
pub const ADMIN_GROUP: &str = "admin";

// == Identity Error ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Token is unknown, malformed or expired
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("User not found: {0}")]
    UserNotFound(String),

    /// The identity provider could not be reached
    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

pub type IdentityResult<T> = std::result::Result<T, IdentityError>;

// == Claims ==
/// Verified token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.groups.iter().any(|g| g == ADMIN_GROUP)
    }

    /// Profile name, or the username when none is set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}

// == Contracts ==
/// Batched username → display name resolution.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolves one batch of usernames.
    ///
    /// Usernames that cannot be resolved are absent from the result; an
    /// error means the whole batch failed.
    async fn lookup_names(&self, usernames: &[String]) -> IdentityResult<HashMap<String, String>>;
}

/// Bearer token verification.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> IdentityResult<Claims>;
}

/// Reading and editing individual user profiles.
#[async_trait]
pub trait UserProfiles: Send + Sync {
    /// Finds a user by `sub` or by username.
    async fn find_user(&self, id: &str) -> IdentityResult<Option<Claims>>;

    /// Replaces the profile name of `username`.
    async fn set_display_name(&self, username: &str, name: &str) -> IdentityResult<()>;
}
