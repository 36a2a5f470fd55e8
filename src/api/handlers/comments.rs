//! Handlers for /api/builds/:id/comments

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::api::auth::AuthUser;
use crate::api::AppState;
use crate::cache::BuildChange;
use crate::error::{ApiError, Result};
use crate::models::requests::validate_comment_content;
use crate::models::{timestamp_now, Comment, EditCommentRequest, MessageResponse, PostCommentRequest};

/// Reports a comment mutation on `build_id`, if the build still exists.
async fn report_comment_change(state: &AppState, build_id: &str) -> Result<()> {
    if let Some(build) = state.builds.get_build(build_id).await? {
        state.public_builds.observe(BuildChange::touched(&build));
    }
    Ok(())
}

/// Handler for GET /api/builds/:id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(build_id): Path<String>,
) -> Result<Json<Vec<Comment>>> {
    Ok(Json(state.comments.comments_for_build(&build_id).await?))
}

/// Handler for POST /api/builds/:id/comments
pub async fn post_comment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(build_id): Path<String>,
    Json(req): Json<PostCommentRequest>,
) -> Result<(StatusCode, Json<Comment>)> {
    if let Some(error_msg) = validate_comment_content(&req.content) {
        return Err(ApiError::BadRequest(error_msg));
    }

    let build = state
        .builds
        .get_build(&build_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Build not found"))?;

    let comment = Comment {
        id: Uuid::new_v4().to_string(),
        build_id,
        content: req.content,
        user_sub: claims.sub,
        username: claims.username,
        created_at: timestamp_now(),
        updated_at: None,
        parent_id: req.parent_id,
        reply_to_username: req.reply_to_username,
    };
    state.comments.put_comment(comment.clone()).await?;
    state.public_builds.observe(BuildChange::touched(&build));

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Handler for PUT /api/builds/:id/comments/:comment_id
pub async fn edit_comment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path((build_id, comment_id)): Path<(String, String)>,
    Json(req): Json<EditCommentRequest>,
) -> Result<Json<Comment>> {
    if let Some(error_msg) = validate_comment_content(&req.content) {
        return Err(ApiError::BadRequest(error_msg));
    }

    let comment = state
        .comments
        .get_comment(&build_id, &comment_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;
    if comment.user_sub != claims.sub {
        return Err(ApiError::forbidden("Unauthorized"));
    }

    let updated = state
        .comments
        .update_comment(&build_id, &comment_id, req.content, timestamp_now())
        .await?;
    report_comment_change(&state, &build_id).await?;

    Ok(Json(updated))
}

/// Handler for DELETE /api/builds/:id/comments/:comment_id
///
/// Absent and foreign comments are indistinguishable to the caller.
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path((build_id, comment_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>> {
    state
        .comments
        .delete_comment_by(&build_id, &comment_id, &claims.sub)
        .await?
        .ok_or_else(|| ApiError::forbidden("Unauthorized or not found"))?;
    report_comment_change(&state, &build_id).await?;

    Ok(Json(MessageResponse::new("Comment deleted")))
}
