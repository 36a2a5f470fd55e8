//! Handlers for user profiles and service health.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::api::auth::AuthUser;
use crate::api::AppState;
use crate::error::{ApiError, Result};
use crate::identity::Claims;
use crate::models::{
    ChangeNameRequest, HealthResponse, MessageResponse, PublicProfileResponse, UserInfoResponse,
};

/// Name shown for users without a profile name.
const DEFAULT_PLAYER_NAME: &str = "Player";

/// Handler for GET /api/users/:username
///
/// Asks the directory directly so unknown users are reported as such.
pub async fn public_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<PublicProfileResponse>> {
    let mut names = state
        .directory
        .lookup_names(std::slice::from_ref(&username))
        .await?;
    let name = names
        .remove(&username)
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(PublicProfileResponse { username, name }))
}

/// Handler for GET /api/user/me
pub async fn me(AuthUser(claims): AuthUser) -> Json<Claims> {
    Json(claims)
}

/// Handler for PUT /api/user/change-name
///
/// The caller's cached display name is dropped, and the public listing is
/// invalidated when it shows any of their builds.
pub async fn change_name(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<ChangeNameRequest>,
) -> Result<Json<MessageResponse>> {
    let name = req.validated_name().map_err(ApiError::BadRequest)?;

    state.profiles.set_display_name(&claims.username, name).await?;
    state.names.evict(&claims.username);

    let listed = state
        .builds
        .builds_by_creator(&claims.username)
        .await?
        .iter()
        .any(|build| build.display);
    if listed {
        state.public_builds.invalidate();
    }
    info!(user = %claims.username, "Display name changed");

    Ok(Json(MessageResponse::new("Name updated successfully")))
}

/// Handler for GET /api/user/info/:sub
pub async fn user_info(
    State(state): State<AppState>,
    Path(sub): Path<String>,
) -> Result<Json<UserInfoResponse>> {
    let user = state
        .profiles
        .find_user(&sub)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let name = user
        .name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string());
    Ok(Json(UserInfoResponse { name }))
}

/// Handler for GET /api/health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback for unmatched routes.
pub async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
