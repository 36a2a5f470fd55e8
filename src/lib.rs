//! Buildboard - community build sharing API
//!
//! Serves user-authored champion builds, their comments and favorites, with a
//! time-bounded cache in front of the public builds listing.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod seed;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
