//! API Handlers
//!
//! HTTP request handlers grouped by resource.

pub mod admin;
pub mod builds;
pub mod comments;
pub mod users;
