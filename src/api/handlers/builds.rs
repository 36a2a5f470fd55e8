//! Handlers for /api/builds

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::api::auth::{AuthUser, MaybeUser};
use crate::api::AppState;
use crate::cache::BuildChange;
use crate::error::{ApiError, Result};
use crate::models::{
    Build, BuildMutationResponse, BuildPatch, CreateBuildRequest, ItemsResponse, MessageResponse,
    UpdateBuildRequest,
};

/// Loads a build and checks the caller owns it.
async fn owned_build(state: &AppState, id: &str, sub: &str) -> Result<Build> {
    let build = state
        .builds
        .get_build(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Build not found"))?;
    if !build.is_owned_by(sub) {
        return Err(ApiError::forbidden("Unauthorized"));
    }
    Ok(build)
}

/// Handler for GET /api/builds
///
/// Serves the cached public listing. Upstream failures surface as an empty list.
pub async fn list_public_builds(State(state): State<AppState>) -> Response {
    let snapshot = state.public_builds.get_public_builds().await;
    Json(snapshot.as_ref()).into_response()
}

/// Handler for POST /api/builds
pub async fn create_build(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateBuildRequest>,
) -> Result<(StatusCode, Json<BuildMutationResponse<Build>>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }

    let build = req.into_build(&claims.sub, &claims.username);
    state.builds.put_build(build.clone()).await?;
    state.public_builds.observe(BuildChange::created(&build));
    info!(build = %build.id, creator = %build.creator, "Build created");

    Ok((
        StatusCode::CREATED,
        Json(BuildMutationResponse::new("Build created successfully", build)),
    ))
}

/// Handler for GET /api/builds/my-builds
pub async fn my_builds(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ItemsResponse<Build>>> {
    let items = state.builds.builds_by_creator(&claims.username).await?;
    Ok(Json(ItemsResponse::new(items)))
}

/// Handler for GET /api/builds/favorites
pub async fn favorite_builds(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<Build>>> {
    Ok(Json(state.builds.favorite_builds(&claims.sub).await?))
}

/// Handler for GET /api/builds/:id
///
/// Public builds are visible to anyone and count a view; private builds
/// only to their owner. The response is the record as read, before the view
/// is counted.
pub async fn get_build(
    State(state): State<AppState>,
    MaybeUser(caller): MaybeUser,
    Path(id): Path<String>,
) -> Result<Json<Build>> {
    let build = state
        .builds
        .get_build(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Build not found"))?;

    if build.display {
        state.builds.increment_views(&id).await?;
        return Ok(Json(build));
    }

    match caller {
        Some(claims) if build.is_owned_by(&claims.sub) => Ok(Json(build)),
        _ => Err(ApiError::not_found("Build not found or not public")),
    }
}

/// Handler for PUT /api/builds/:id
pub async fn update_build(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateBuildRequest>,
) -> Result<Json<BuildMutationResponse<Build>>> {
    let before = owned_build(&state, &id, &claims.sub).await?;

    let patch = BuildPatch::from(req);
    if patch.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let after = state.builds.update_build(&id, patch).await?;
    state.public_builds.observe(BuildChange::updated(&before, &after));

    Ok(Json(BuildMutationResponse::new("Build updated successfully", after)))
}

/// Handler for DELETE /api/builds/:id
pub async fn delete_build(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let build = owned_build(&state, &id, &claims.sub).await?;

    state.builds.delete_build(&id).await?;
    state.public_builds.observe(BuildChange::deleted(&build));
    info!(build = %id, "Build deleted");

    Ok(Json(MessageResponse::new("Build deleted successfully")))
}

/// Handler for PATCH /api/builds/:id/like
pub async fn like_build(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Build>> {
    let build = state.builds.increment_likes(&id).await?;
    state.public_builds.observe(BuildChange::touched(&build));
    Ok(Json(build))
}

/// Handler for PATCH /api/builds/:id/favorite
///
/// Toggles the caller in the build's favorite list.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Build>> {
    let build = state.builds.toggle_favorite(&id, &claims.sub).await?;
    state.public_builds.observe(BuildChange::touched(&build));
    Ok(Json(build))
}
