//! Seed data for the in-memory backends.
//!
//! File layout:
//! ```json
//! {
//!   "users":    [{"username": "alice", "sub": "...", "name": "Alice", "groups": [], "token": "..."}],
//!   "builds":   [{"id": "b1", "creator": "alice", "championName": "Ahri", "display": "true"}],
//!   "comments": [{"id": "c1", "buildId": "b1", "content": "...", "user_sub": "...", "username": "alice", "createdAt": "..."}]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::identity::{IdentityError, InMemoryIdentity, UserRecord};
use crate::models::{Build, Comment};
use crate::store::{BuildStore, CommentStore, InMemoryStore, StoreError};

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

/// A user plus an optional pre-issued bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    #[serde(flatten)]
    pub user: UserRecord,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub builds: Vec<Build>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Counts of loaded records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub builds: usize,
    pub comments: usize,
}

impl SeedData {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Writes every record into the given backends.
    pub async fn apply(
        self,
        store: &InMemoryStore,
        identity: &InMemoryIdentity,
    ) -> Result<SeedSummary, SeedError> {
        let summary = SeedSummary {
            users: self.users.len(),
            builds: self.builds.len(),
            comments: self.comments.len(),
        };

        for SeedUser { user, token } in self.users {
            let username = user.username.clone();
            identity.register(user).await;
            if let Some(token) = token {
                identity.issue_token(&username, token).await?;
            }
        }
        for build in self.builds {
            store.put_build(build).await?;
        }
        for comment in self.comments {
            store.put_comment(comment).await?;
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{TokenVerifier, UserDirectory};
    use crate::store::PublicBuildSource;

    const SEED: &str = r#"{
        "users": [
            {"username": "alice", "sub": "sub-alice", "name": "Alice A.", "token": "t-alice"},
            {"username": "root", "sub": "sub-root", "groups": ["admin"]}
        ],
        "builds": [
            {"id": "b1", "sub": "sub-alice", "creator": "alice", "championName": "Ahri", "display": "true"},
            {"id": "b2", "sub": "sub-alice", "creator": "alice", "championName": "Jinx", "display": false}
        ],
        "comments": [
            {"id": "c1", "buildId": "b1", "content": "gg", "user_sub": "sub-root",
             "username": "root", "createdAt": "2024-01-01T00:00:00.000Z"}
        ]
    }"#;

    #[tokio::test]
    async fn test_seed_apply() {
        let store = InMemoryStore::new();
        let identity = InMemoryIdentity::new();

        let summary = SeedData::from_json(SEED)
            .unwrap()
            .apply(&store, &identity)
            .await
            .unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                users: 2,
                builds: 2,
                comments: 1
            }
        );
        assert_eq!(store.query_public_builds().await.unwrap().len(), 1);
        assert_eq!(store.comments_for_build("b1").await.unwrap().len(), 1);
        assert_eq!(identity.verify("t-alice").await.unwrap().username, "alice");

        let names = identity.lookup_names(&["root".to_string()]).await.unwrap();
        assert_eq!(names["root"], "root");
    }

    #[test]
    fn test_seed_rejects_malformed_json() {
        assert!(matches!(SeedData::from_json("{"), Err(SeedError::Parse(_))));
    }

    #[test]
    fn test_seed_missing_file() {
        assert!(matches!(
            SeedData::load("/nonexistent/seed.json"),
            Err(SeedError::Io(_))
        ));
    }
}
