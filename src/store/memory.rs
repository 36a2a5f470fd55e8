//! In-memory document store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BuildStore, CommentStore, PublicBuildSource, StoreError, StoreResult};
use crate::models::{Build, BuildPatch, Comment};

/// Builds and comments held in process memory.
///
/// Listings are returned newest first; comments oldest first.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    builds: RwLock<HashMap<String, Build>>,
    /// Comments grouped by build id
    comments: RwLock<HashMap<String, Vec<Comment>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select(&self, predicate: impl Fn(&Build) -> bool) -> Vec<Build> {
        let builds = self.builds.read().await;
        let mut selected: Vec<Build> = builds.values().filter(|b| predicate(b)).cloned().collect();
        selected.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        selected
    }

    async fn modify(&self, id: &str, f: impl FnOnce(&mut Build)) -> StoreResult<Build> {
        let mut builds = self.builds.write().await;
        let build = builds
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("Build", id))?;
        f(build);
        Ok(build.clone())
    }
}

#[async_trait]
impl PublicBuildSource for InMemoryStore {
    async fn query_public_builds(&self) -> StoreResult<Vec<Build>> {
        Ok(self.select(|b| b.display).await)
    }
}

#[async_trait]
impl BuildStore for InMemoryStore {
    async fn list_builds(&self) -> StoreResult<Vec<Build>> {
        Ok(self.select(|_| true).await)
    }

    async fn builds_by_creator(&self, creator: &str) -> StoreResult<Vec<Build>> {
        Ok(self.select(|b| b.creator == creator).await)
    }

    async fn favorite_builds(&self, sub: &str) -> StoreResult<Vec<Build>> {
        Ok(self.select(|b| b.favorite.iter().any(|s| s == sub)).await)
    }

    async fn get_build(&self, id: &str) -> StoreResult<Option<Build>> {
        Ok(self.builds.read().await.get(id).cloned())
    }

    async fn put_build(&self, build: Build) -> StoreResult<()> {
        self.builds.write().await.insert(build.id.clone(), build);
        Ok(())
    }

    async fn update_build(&self, id: &str, patch: BuildPatch) -> StoreResult<Build> {
        self.modify(id, |build| patch.apply_to(build)).await
    }

    async fn delete_build(&self, id: &str) -> StoreResult<Option<Build>> {
        Ok(self.builds.write().await.remove(id))
    }

    async fn increment_views(&self, id: &str) -> StoreResult<Build> {
        self.modify(id, |build| build.views += 1).await
    }

    async fn increment_likes(&self, id: &str) -> StoreResult<Build> {
        self.modify(id, |build| build.like += 1).await
    }

    async fn toggle_favorite(&self, id: &str, sub: &str) -> StoreResult<Build> {
        self.modify(id, |build| {
            if let Some(pos) = build.favorite.iter().position(|s| s == sub) {
                build.favorite.remove(pos);
            } else {
                build.favorite.push(sub.to_string());
            }
        })
        .await
    }
}

#[async_trait]
impl CommentStore for InMemoryStore {
    async fn comments_for_build(&self, build_id: &str) -> StoreResult<Vec<Comment>> {
        let comments = self.comments.read().await;
        let mut thread = comments.get(build_id).cloned().unwrap_or_default();
        thread.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(thread)
    }

    async fn get_comment(&self, build_id: &str, id: &str) -> StoreResult<Option<Comment>> {
        let comments = self.comments.read().await;
        Ok(comments
            .get(build_id)
            .and_then(|thread| thread.iter().find(|c| c.id == id))
            .cloned())
    }

    async fn put_comment(&self, comment: Comment) -> StoreResult<()> {
        let mut comments = self.comments.write().await;
        let thread = comments.entry(comment.build_id.clone()).or_default();
        match thread.iter_mut().find(|c| c.id == comment.id) {
            Some(existing) => *existing = comment,
            None => thread.push(comment),
        }
        Ok(())
    }

    async fn update_comment(
        &self,
        build_id: &str,
        id: &str,
        content: String,
        updated_at: String,
    ) -> StoreResult<Comment> {
        let mut comments = self.comments.write().await;
        let comment = comments
            .get_mut(build_id)
            .and_then(|thread| thread.iter_mut().find(|c| c.id == id))
            .ok_or_else(|| StoreError::not_found("Comment", id))?;
        comment.content = content;
        comment.updated_at = Some(updated_at);
        Ok(comment.clone())
    }

    async fn delete_comment_by(
        &self,
        build_id: &str,
        id: &str,
        user_sub: &str,
    ) -> StoreResult<Option<Comment>> {
        let mut comments = self.comments.write().await;
        let Some(thread) = comments.get_mut(build_id) else {
            return Ok(None);
        };
        let removed = thread
            .iter()
            .position(|c| c.id == id && c.user_sub == user_sub)
            .map(|pos| thread.remove(pos));
        if thread.is_empty() {
            comments.remove(build_id);
        }
        Ok(removed)
    }
}
