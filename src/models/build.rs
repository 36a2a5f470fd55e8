//! Domain records: builds, comments and partial build updates.

use chrono::{SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

// == Build ==
/// A user-authored champion loadout.
///
/// Only `display`, `creator` and `sub` carry meaning for the server; the
/// remaining fields are presentation data passed through as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    pub id: String,
    /// Identity subject of the owner
    #[serde(default)]
    pub sub: String,
    /// Username of the owner
    pub creator: String,
    #[serde(default)]
    pub description: String,
    pub champion_name: String,
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
    /// Public visibility flag
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub display: bool,
    #[serde(default)]
    pub like: u64,
    #[serde(default)]
    pub views: u64,
    /// Subjects of users who favorited this build
    #[serde(default)]
    pub favorite: Vec<String>,
    #[serde(default)]
    pub created_at: String,
}

impl Build {
    /// Creates a private build with a fresh id and creation timestamp.
    pub fn new(
        sub: impl Into<String>,
        creator: impl Into<String>,
        champion_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sub: sub.into(),
            creator: creator.into(),
            description: String::new(),
            champion_name: champion_name.into(),
            relic_set: Vec::new(),
            powers: Vec::new(),
            rune: Vec::new(),
            regions: Vec::new(),
            star: 0,
            display: false,
            like: 0,
            views: 0,
            favorite: Vec::new(),
            created_at: timestamp_now(),
        }
    }

    pub fn is_owned_by(&self, sub: &str) -> bool {
        self.sub == sub
    }
}

// == Build Patch ==
/// Partial update of a build; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildPatch {
    pub champion_name: Option<String>,
    pub description: Option<String>,
    pub relic_set: Option<Vec<Value>>,
    pub powers: Option<Vec<Value>>,
    pub rune: Option<Vec<Value>>,
    pub regions: Option<Vec<Value>>,
    pub star: Option<u32>,
    pub display: Option<bool>,
    pub like: Option<u64>,
    pub views: Option<u64>,
}

impl BuildPatch {
    /// Returns true if the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes every present field into `build`.
    pub fn apply_to(self, build: &mut Build) {
        if let Some(v) = self.champion_name {
            build.champion_name = v;
        }
        if let Some(v) = self.description {
            build.description = v;
        }
        if let Some(v) = self.relic_set {
            build.relic_set = v;
        }
        if let Some(v) = self.powers {
            build.powers = v;
        }
        if let Some(v) = self.rune {
            build.rune = v;
        }
        if let Some(v) = self.regions {
            build.regions = v;
        }
        if let Some(v) = self.star {
            build.star = v;
        }
        if let Some(v) = self.display {
            build.display = v;
        }
        if let Some(v) = self.like {
            build.like = v;
        }
        if let Some(v) = self.views {
            build.views = v;
        }
    }
}

// == Public Build ==
/// A public build enriched with its creator's display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicBuild {
    #[serde(flatten)]
    pub build: Build,
    pub creator_name: String,
}

// == Comment ==
/// A comment (or reply) attached to a build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub build_id: String,
    pub content: String,
    /// Identity subject of the author
    #[serde(rename = "user_sub")]
    pub user_sub: String,
    pub username: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub reply_to_username: Option<String>,
}

/// Current UTC time as an RFC 3339 string with millisecond precision.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// == Visibility Flag Decoding ==
// Stored records and older clients encode the flag as "true"/"false".
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Text(String),
}

impl RawFlag {
    fn into_bool<E: de::Error>(self) -> Result<bool, E> {
        match self {
            RawFlag::Bool(b) => Ok(b),
            RawFlag::Text(s) => match s.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(E::invalid_value(
                    de::Unexpected::Str(other),
                    &"a boolean or \"true\"/\"false\"",
                )),
            },
        }
    }
}

/// Deserializes a visibility flag from a boolean or its string form.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    RawFlag::deserialize(deserializer)?.into_bool()
}

/// Optional variant of [`deserialize_flag`] for partial updates.
pub fn deserialize_optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawFlag>::deserialize(deserializer)?
        .map(RawFlag::into_bool)
        .transpose()
}
