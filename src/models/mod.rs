//! Domain records plus request and response models for the builds API
//!
//! This module defines the stored records and the DTOs (Data Transfer Objects)
//! used for serializing/deserializing HTTP request and response bodies.

pub mod build;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use build::{timestamp_now, Build, BuildPatch, Comment, PublicBuild};
pub use requests::{
    AdminCreateBuildRequest, AdminUpdateBuildRequest, ChangeNameRequest, CreateBuildRequest,
    EditCommentRequest, PostCommentRequest, UpdateBuildRequest,
};
pub use responses::{
    BuildMutationResponse, ErrorResponse, HealthResponse, ItemsResponse, MessageResponse,
    PublicProfileResponse, UserInfoResponse,
};
