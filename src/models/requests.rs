//! Request DTOs for the builds API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use super::build::{deserialize_flag, deserialize_optional_flag, Build, BuildPatch};

/// Request body for POST /api/builds
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBuildRequest {
    #[serde(default)]
    pub champion_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub relic_set: Vec<Value>,
    #[serde(default)]
    pub powers: Vec<Value>,
    #[serde(default)]
    pub rune: Vec<Value>,
    #[serde(default)]
    pub regions: Vec<Value>,
    #[serde(default)]
    pub star: u32,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub display: bool,
}

impl CreateBuildRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.champion_name.is_empty() || self.relic_set.is_empty() {
            return Some("Champion name and relicSet are required.".to_string());
        }
        None
    }

    /// Builds the stored record for the given owner.
    pub fn into_build(self, sub: &str, creator: &str) -> Build {
        let mut build = Build::new(sub, creator, self.champion_name);
        build.description = self.description;
        build.relic_set = self.relic_set;
        build.powers = self.powers;
        build.rune = self.rune;
        build.regions = self.regions;
        build.star = self.star;
        build.display = self.display;
        build
    }
}

/// Request body for PUT /api/builds/:id
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBuildRequest {
    pub description: Option<String>,
    pub relic_set: Option<Vec<Value>>,
    pub powers: Option<Vec<Value>>,
    pub rune: Option<Vec<Value>>,
    pub regions: Option<Vec<Value>>,
    pub star: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub display: Option<bool>,
}

impl From<UpdateBuildRequest> for BuildPatch {
    fn from(req: UpdateBuildRequest) -> Self {
        BuildPatch {
            description: req.description,
            relic_set: req.relic_set,
            powers: req.powers,
            rune: req.rune,
            regions: req.regions,
            star: req.star,
            display: req.display,
            ..Default::default()
        }
    }
}

/// Request body for POST /api/admin/builds
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCreateBuildRequest {
    #[serde(default)]
    pub champion_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub relic_set: Vec<Value>,
    #[serde(default)]
    pub powers: Vec<Value>,
    #[serde(default)]
    pub rune: Vec<Value>,
    #[serde(default)]
    pub regions: Vec<Value>,
    #[serde(default)]
    pub star: u32,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub display: bool,
}

impl AdminCreateBuildRequest {
    pub fn validate(&self) -> Option<String> {
        if self.champion_name.trim().is_empty() {
            return Some("Champion name is required.".to_string());
        }
        None
    }

    pub fn into_build(self, sub: &str, creator: &str) -> Build {
        let mut build = Build::new(sub, creator, self.champion_name.trim());
        build.description = self.description;
        build.relic_set = self.relic_set;
        build.powers = self.powers;
        build.rune = self.rune;
        build.regions = self.regions;
        build.star = self.star;
        build.display = self.display;
        build
    }
}

/// Request body for PUT /api/admin/builds/:id
///
/// Admins may additionally rename the champion and correct counters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateBuildRequest {
    pub champion_name: Option<String>,
    pub description: Option<String>,
    pub relic_set: Option<Vec<Value>>,
    pub powers: Option<Vec<Value>>,
    pub rune: Option<Vec<Value>>,
    pub regions: Option<Vec<Value>>,
    pub star: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub display: Option<bool>,
    pub like: Option<u64>,
    pub views: Option<u64>,
}

impl From<AdminUpdateBuildRequest> for BuildPatch {
    fn from(req: AdminUpdateBuildRequest) -> Self {
        BuildPatch {
            champion_name: req.champion_name,
            description: req.description,
            relic_set: req.relic_set,
            powers: req.powers,
            rune: req.rune,
            regions: req.regions,
            star: req.star,
            display: req.display,
            like: req.like,
            views: req.views,
        }
    }
}

/// Request body for POST /api/builds/:id/comments
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub reply_to_username: Option<String>,
}

/// Request body for PUT /api/builds/:id/comments/:comment_id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditCommentRequest {
    #[serde(default)]
    pub content: String,
}

/// Shared content check for comment bodies.
pub fn validate_comment_content(content: &str) -> Option<String> {
    if content.is_empty() {
        return Some("Content required".to_string());
    }
    None
}

/// Request body for PUT /api/user/change-name
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeNameRequest {
    #[serde(default)]
    pub name: String,
}

impl ChangeNameRequest {
    pub const MIN_LEN: usize = 3;

    /// The trimmed name, or the validation message.
    pub fn validated_name(&self) -> Result<&str, String> {
        let name = self.name.trim();
        if name.chars().count() < Self::MIN_LEN {
            return Err(format!("Name must be at least {} characters", Self::MIN_LEN));
        }
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let json = r#"{"championName": "Ahri", "relicSet": ["r1"]}"#;
        let req: CreateBuildRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.champion_name, "Ahri");
        assert!(!req.display);
        assert_eq!(req.star, 0);
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_create_request_requires_relic_set() {
        let json = r#"{"championName": "Ahri"}"#;
        let req: CreateBuildRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            req.validate().as_deref(),
            Some("Champion name and relicSet are required.")
        );
    }

    #[test]
    fn test_create_request_into_build() {
        let json = r#"{"championName": "Ahri", "relicSet": ["r1"], "display": true, "star": 4}"#;
        let req: CreateBuildRequest = serde_json::from_str(json).unwrap();
        let build = req.into_build("sub-1", "alice");
        assert!(build.display);
        assert_eq!(build.star, 4);
        assert_eq!(build.creator, "alice");
        assert_eq!(build.sub, "sub-1");
    }

    #[test]
    fn test_update_request_into_patch() {
        let json = r#"{"display": "false", "description": "new"}"#;
        let req: UpdateBuildRequest = serde_json::from_str(json).unwrap();
        let patch = BuildPatch::from(req);
        assert_eq!(patch.display, Some(false));
        assert_eq!(patch.description.as_deref(), Some("new"));
        assert!(patch.like.is_none());
    }

    #[test]
    fn test_update_request_ignores_admin_fields() {
        let json = r#"{"like": 999}"#;
        let req: UpdateBuildRequest = serde_json::from_str(json).unwrap();
        assert!(BuildPatch::from(req).is_empty());
    }

    #[test]
    fn test_admin_create_requires_non_blank_name() {
        let req = AdminCreateBuildRequest {
            champion_name: "   ".into(),
            ..Default::default()
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_change_name_is_trimmed_and_checked() {
        let req: ChangeNameRequest = serde_json::from_str(r#"{"name": "  Alicia  "}"#).unwrap();
        assert_eq!(req.validated_name(), Ok("Alicia"));

        let short: ChangeNameRequest = serde_json::from_str(r#"{"name": " Al "}"#).unwrap();
        assert!(short.validated_name().is_err());

        let missing: ChangeNameRequest = serde_json::from_str("{}").unwrap();
        assert!(missing.validated_name().is_err());
    }

    #[test]
    fn test_comment_content_validation() {
        assert!(validate_comment_content("").is_some());
        assert!(validate_comment_content("gg").is_none());
    }
}
