//! Store Module
//!
//! Contracts for the document store holding builds and comments, plus an
//! in-memory implementation.

mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Build, BuildPatch, Comment};

pub use memory::InMemoryStore;

// == Store Error ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Record does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The store could not be reached or rejected the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Contracts ==
/// Source of the public builds listing.
#[async_trait]
pub trait PublicBuildSource: Send + Sync {
    /// Returns every build whose visibility flag is set.
    async fn query_public_builds(&self) -> StoreResult<Vec<Build>>;
}

/// Build persistence.
#[async_trait]
pub trait BuildStore: PublicBuildSource {
    async fn list_builds(&self) -> StoreResult<Vec<Build>>;

    async fn builds_by_creator(&self, creator: &str) -> StoreResult<Vec<Build>>;

    /// Builds whose favorite list contains `sub`.
    async fn favorite_builds(&self, sub: &str) -> StoreResult<Vec<Build>>;

    async fn get_build(&self, id: &str) -> StoreResult<Option<Build>>;

    /// Inserts or replaces a build.
    async fn put_build(&self, build: Build) -> StoreResult<()>;

    /// Applies `patch` and returns the updated record.
    async fn update_build(&self, id: &str, patch: BuildPatch) -> StoreResult<Build>;

    /// Removes a build, returning it if it existed.
    async fn delete_build(&self, id: &str) -> StoreResult<Option<Build>>;

    async fn increment_views(&self, id: &str) -> StoreResult<Build>;

    async fn increment_likes(&self, id: &str) -> StoreResult<Build>;

    /// Adds `sub` to the favorite list, or removes it if already present.
    async fn toggle_favorite(&self, id: &str, sub: &str) -> StoreResult<Build>;
}

/// Comment persistence, keyed by (build id, comment id).
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Comments of a build, oldest first.
    async fn comments_for_build(&self, build_id: &str) -> StoreResult<Vec<Comment>>;

    async fn get_comment(&self, build_id: &str, id: &str) -> StoreResult<Option<Comment>>;

    async fn put_comment(&self, comment: Comment) -> StoreResult<()>;

    async fn update_comment(
        &self,
        build_id: &str,
        id: &str,
        content: String,
        updated_at: String,
    ) -> StoreResult<Comment>;

    /// Deletes the comment only if `user_sub` wrote it.
    ///
    /// Returns the removed comment; `None` when it is absent or owned by
    /// someone else. The ownership check and the removal are one write.
    async fn delete_comment_by(
        &self,
        build_id: &str,
        id: &str,
        user_sub: &str,
    ) -> StoreResult<Option<Comment>>;
}
