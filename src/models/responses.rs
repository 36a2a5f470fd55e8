//! Response DTOs for the builds API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Envelope for list endpoints: `{"items": [...]}`
#[derive(Debug, Clone, Serialize)]
pub struct ItemsResponse<T> {
    pub items: Vec<T>,
}

impl<T> ItemsResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

/// Response body for build create/update operations
#[derive(Debug, Clone, Serialize)]
pub struct BuildMutationResponse<B> {
    /// Success message
    pub message: String,
    /// The build as stored after the mutation
    pub build: B,
}

impl<B> BuildMutationResponse<B> {
    pub fn new(message: impl Into<String>, build: B) -> Self {
        Self {
            message: message.into(),
            build,
        }
    }
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for GET /api/users/:username
#[derive(Debug, Clone, Serialize)]
pub struct PublicProfileResponse {
    pub username: String,
    pub name: String,
}

/// Response body for GET /api/user/info/:sub
#[derive(Debug, Clone, Serialize)]
pub struct UserInfoResponse {
    pub name: String,
}

/// Response body for the health endpoint (GET /api/health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_response_serialize() {
        let resp = ItemsResponse::new(vec![1, 2, 3]);
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"items":[1,2,3]}"#);
    }

    #[test]
    fn test_mutation_response_serialize() {
        let resp = BuildMutationResponse::new("Build created successfully", "b1");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["message"], "Build created successfully");
        assert_eq!(json["build"], "b1");
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Route not found");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"error":"Route not found"}"#);
    }
}
