//! Bearer token extractors.
//!
//! - [`AuthUser`] requires a verified token.
//! - [`AdminUser`] additionally requires the admin group.
//! - [`MaybeUser`] never rejects; an absent or bad token yields `None`.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;

use super::AppState;
use crate::error::ApiError;
use crate::identity::Claims;

/// Extracts the token from `Authorization: <scheme> <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Authorization header is missing".into()))?;

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.split_once(' '))
        .map(|(_, token)| token.trim())
        .unwrap_or_default();

    // Clients without a session have been seen sending these literals
    if token.is_empty() || token == "null" || token == "undefined" {
        return Err(ApiError::Unauthorized("Token is missing or invalid".into()));
    }
    Ok(token)
}

/// A caller with a verified token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let claims = state.verifier.verify(token).await.map_err(|err| {
            warn!(error = %err, "Token verification failed");
            ApiError::from(err)
        })?;
        Ok(Self(claims))
    }
}

/// A caller in the admin group.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        if !claims.is_admin() {
            warn!(user = %claims.username, "Non-admin attempted admin access");
            return Err(ApiError::forbidden("Access denied: admin role required"));
        }
        Ok(Self(claims))
    }
}

/// A caller who may or may not be signed in.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Claims>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Ok(token) = bearer_token(&parts.headers) else {
            return Ok(Self(None));
        };
        match state.verifier.verify(token).await {
            Ok(claims) => Ok(Self(Some(claims))),
            Err(err) => {
                warn!(error = %err, "Ignoring invalid optional token");
                Ok(Self(None))
            }
        }
    }
}
