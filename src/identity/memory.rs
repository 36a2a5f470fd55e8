//! In-memory identity provider.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{Claims, IdentityError, IdentityResult, TokenVerifier, UserDirectory, UserProfiles};

/// A registered user and the profile attributes the API reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, sub: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            sub: sub.into(),
            name: None,
            groups: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    fn claims(&self) -> Claims {
        Claims {
            sub: self.sub.clone(),
            username: self.username.clone(),
            name: self.name.clone(),
            groups: self.groups.clone(),
        }
    }
}

/// Users and opaque bearer tokens held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryIdentity {
    users: RwLock<HashMap<String, UserRecord>>,
    /// token -> username
    tokens: RwLock<HashMap<String, String>>,
}

impl InMemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a user.
    pub async fn register(&self, user: UserRecord) {
        self.users.write().await.insert(user.username.clone(), user);
    }

    /// Binds `token` to an existing user.
    pub async fn issue_token(&self, username: &str, token: impl Into<String>) -> IdentityResult<()> {
        if !self.users.read().await.contains_key(username) {
            return Err(IdentityError::UserNotFound(username.to_string()));
        }
        self.tokens
            .write()
            .await
            .insert(token.into(), username.to_string());
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryIdentity {
    async fn lookup_names(&self, usernames: &[String]) -> IdentityResult<HashMap<String, String>> {
        let users = self.users.read().await;
        Ok(usernames
            .iter()
            .filter_map(|username| users.get(username))
            .map(|user| {
                let name = user.name.clone().unwrap_or_else(|| user.username.clone());
                (user.username.clone(), name)
            })
            .collect())
    }
}

#[async_trait]
impl TokenVerifier for InMemoryIdentity {
    async fn verify(&self, token: &str) -> IdentityResult<Claims> {
        let username = self
            .tokens
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or(IdentityError::InvalidToken)?;

        // A token outliving its user is treated as invalid
        self.users
            .read()
            .await
            .get(&username)
            .map(UserRecord::claims)
            .ok_or(IdentityError::InvalidToken)
    }
}

#[async_trait]
impl UserProfiles for InMemoryIdentity {
    async fn find_user(&self, id: &str) -> IdentityResult<Option<Claims>> {
        let users = self.users.read().await;
        let found = users
            .get(id)
            .or_else(|| users.values().find(|user| user.sub == id));
        Ok(found.map(UserRecord::claims))
    }

    async fn set_display_name(&self, username: &str, name: &str) -> IdentityResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(username)
            .ok_or_else(|| IdentityError::UserNotFound(username.to_string()))?;
        user.name = Some(name.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn identity() -> InMemoryIdentity {
        let identity = InMemoryIdentity::new();
        identity
            .register(UserRecord::new("alice", "sub-alice").with_name("Alice A."))
            .await;
        identity
            .register(UserRecord::new("root", "sub-root").with_group("admin"))
            .await;
        identity.issue_token("alice", "token-alice").await.unwrap();
        identity
    }

    #[tokio::test]
    async fn test_verify_known_token() {
        let identity = identity().await;

        let claims = identity.verify("token-alice").await.unwrap();
        assert_eq!(claims.sub, "sub-alice");
        assert_eq!(claims.username, "alice");
        assert!(!claims.is_admin());
    }

    #[tokio::test]
    async fn test_verify_unknown_token() {
        let identity = identity().await;

        assert_eq!(identity.verify("nope").await, Err(IdentityError::InvalidToken));
    }

    #[tokio::test]
    async fn test_find_user_by_sub_or_username() {
        let identity = identity().await;

        let by_sub = identity.find_user("sub-alice").await.unwrap().unwrap();
        assert_eq!(by_sub.username, "alice");
        let by_name = identity.find_user("root").await.unwrap().unwrap();
        assert_eq!(by_name.sub, "sub-root");
        assert!(identity.find_user("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_display_name() {
        let identity = identity().await;

        identity.set_display_name("alice", "Alicia").await.unwrap();

        let names = identity.lookup_names(&["alice".into()]).await.unwrap();
        assert_eq!(names["alice"], "Alicia");
        // Tokens see the new name immediately
        let claims = identity.verify("token-alice").await.unwrap();
        assert_eq!(claims.name.as_deref(), Some("Alicia"));

        assert_eq!(
            identity.set_display_name("ghost", "Ghost").await,
            Err(IdentityError::UserNotFound("ghost".into()))
        );
    }

    #[tokio::test]
    async fn test_issue_token_for_unknown_user() {
        let identity = identity().await;

        let result = identity.issue_token("ghost", "t").await;
        assert_eq!(result, Err(IdentityError::UserNotFound("ghost".into())));
    }

    #[tokio::test]
    async fn test_lookup_names_omits_unknown_users() {
        let identity = identity().await;

        let names = identity
            .lookup_names(&["alice".into(), "root".into(), "ghost".into()])
            .await
            .unwrap();
        assert_eq!(names.get("alice").map(String::as_str), Some("Alice A."));
        // No profile name: falls back to the username
        assert_eq!(names.get("root").map(String::as_str), Some("root"));
        assert!(!names.contains_key("ghost"));
    }
}
