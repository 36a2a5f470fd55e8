//! API Routes
//!
//! Configures the Axum router with all builds API endpoints.

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, patch, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{admin, builds, comments, users};
use super::AppState;

/// Request bodies may carry large build descriptions.
pub const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/health` - Health check
/// - `/api/builds/...` - Public listing, build CRUD, likes, favorites, comments
/// - `/api/admin/builds/...` - Admin build management and cache control
/// - `GET /api/users/:username`, `/api/user/...` - Profiles and name changes
///
/// # Middleware
/// - CORS: `allowed_origins`, or any origin when empty
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/api/health", get(users::health_handler))
        .route(
            "/api/builds",
            get(builds::list_public_builds).post(builds::create_build),
        )
        .route("/api/builds/my-builds", get(builds::my_builds))
        .route("/api/builds/favorites", get(builds::favorite_builds))
        .route(
            "/api/builds/:id",
            get(builds::get_build)
                .put(builds::update_build)
                .delete(builds::delete_build),
        )
        .route("/api/builds/:id/like", patch(builds::like_build))
        .route("/api/builds/:id/favorite", patch(builds::toggle_favorite))
        .route(
            "/api/builds/:id/comments",
            get(comments::list_comments).post(comments::post_comment),
        )
        .route(
            "/api/builds/:id/comments/:comment_id",
            put(comments::edit_comment).delete(comments::delete_comment),
        )
        .route(
            "/api/admin/builds",
            get(admin::list_builds).post(admin::create_build),
        )
        .route(
            "/api/admin/builds/cache",
            get(admin::cache_stats).delete(admin::flush_cache),
        )
        .route(
            "/api/admin/builds/:id",
            put(admin::update_build).delete(admin::delete_build),
        )
        .route("/api/users/:username", get(users::public_profile))
        .route("/api/user/me", get(users::me))
        .route("/api/user/change-name", put(users::change_name))
        .route("/api/user/info/:sub", get(users::user_info))
        .fallback(users::route_not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured origins; unparseable origins are skipped.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
