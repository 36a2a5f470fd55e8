//! Handlers for /api/admin/builds
//!
//! Every handler requires the admin group.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::api::auth::AdminUser;
use crate::api::AppState;
use crate::cache::{BuildChange, CacheStats};
use crate::error::{ApiError, Result};
use crate::models::{
    AdminCreateBuildRequest, AdminUpdateBuildRequest, Build, BuildMutationResponse, BuildPatch,
    ItemsResponse, MessageResponse, PublicBuild,
};

/// Handler for GET /api/admin/builds
pub async fn list_builds(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<ItemsResponse<Build>>> {
    Ok(Json(ItemsResponse::new(state.builds.list_builds().await?)))
}

/// Handler for POST /api/admin/builds
///
/// The response carries the admin's display name as `creatorName`.
pub async fn create_build(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Json(req): Json<AdminCreateBuildRequest>,
) -> Result<(StatusCode, Json<BuildMutationResponse<PublicBuild>>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }

    let build = req.into_build(&claims.sub, &claims.username);
    state.builds.put_build(build.clone()).await?;
    state.public_builds.observe(BuildChange::created(&build));
    info!(build = %build.id, admin = %claims.username, "Admin created build");

    let created = PublicBuild {
        build,
        creator_name: claims.display_name().to_string(),
    };
    Ok((
        StatusCode::CREATED,
        Json(BuildMutationResponse::new("Build created successfully", created)),
    ))
}

/// Handler for PUT /api/admin/builds/:id
pub async fn update_build(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
    Json(req): Json<AdminUpdateBuildRequest>,
) -> Result<Json<BuildMutationResponse<Build>>> {
    let before = state
        .builds
        .get_build(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Build not found"))?;

    let patch = BuildPatch::from(req);
    if patch.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let after = state.builds.update_build(&id, patch).await?;
    state.public_builds.observe(BuildChange::updated(&before, &after));

    Ok(Json(BuildMutationResponse::new("Build updated successfully", after)))
}

/// Handler for DELETE /api/admin/builds/:id
pub async fn delete_build(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let build = state
        .builds
        .delete_build(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Build not found"))?;
    state.public_builds.observe(BuildChange::deleted(&build));
    info!(build = %id, admin = %claims.username, "Admin deleted build");

    Ok(Json(MessageResponse::new("Build deleted successfully")))
}

/// Handler for GET /api/admin/builds/cache
pub async fn cache_stats(State(state): State<AppState>, AdminUser(_): AdminUser) -> Json<CacheStats> {
    Json(state.public_builds.stats())
}

/// Handler for DELETE /api/admin/builds/cache
pub async fn flush_cache(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Json<MessageResponse> {
    state.public_builds.invalidate();
    Json(MessageResponse::new("Public builds cache invalidated"))
}
