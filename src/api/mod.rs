//! API Module
//!
//! HTTP handlers and routing for the builds REST API.
//!
//! Mutation handlers report every build change to the public builds cache
//! through [`crate::cache::BuildChange`]; the cache decides whether to
//! invalidate.

pub mod auth;
pub mod handlers;
pub mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
