//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Name cache cleanup: Removes expired creator display names at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
