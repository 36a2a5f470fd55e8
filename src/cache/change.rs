//! Build change notifications.
//!
//! Mutation paths describe what they did to a build's visibility; the public
//! builds cache decides from that alone whether its snapshot is affected.

use crate::models::Build;

/// Visibility of a build before and after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildChange {
    pub was_public: bool,
    pub is_public: bool,
}

impl BuildChange {
    pub fn created(build: &Build) -> Self {
        Self {
            was_public: false,
            is_public: build.display,
        }
    }

    pub fn updated(before: &Build, after: &Build) -> Self {
        Self {
            was_public: before.display,
            is_public: after.display,
        }
    }

    pub fn deleted(build: &Build) -> Self {
        Self {
            was_public: build.display,
            is_public: false,
        }
    }

    /// Content changed without touching visibility (likes, favorites, comments).
    pub fn touched(build: &Build) -> Self {
        Self {
            was_public: build.display,
            is_public: build.display,
        }
    }

    /// True if the public listing may differ after this change.
    pub fn affects_public_listing(&self) -> bool {
        self.was_public || self.is_public
    }
}
