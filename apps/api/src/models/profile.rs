use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A user's profile document. One per user, enforced by a unique index on
/// `user`. The `extra` map carries submitted fields the API does not
/// recognize; they are stored verbatim and serialized inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: Uuid,
    pub status: String,
    pub website: String,
    pub skills: Vec<String>,
    #[serde(default)]
    pub social: SocialLinks,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fixed-key social links. Keys the caller did not supply are omitted from
/// the stored document entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
}

/// Embedded experience entry. `_id` is the stable identifier used for
/// targeted removal; it never changes when siblings are added or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Embedded education entry, same identifier semantics as [`Experience`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    #[serde(rename = "fieldOfStudy")]
    pub field_of_study: String,
    pub from: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Normalized output of the profile builder: exactly the paths a POST is
/// allowed to set. Sub-collections, identity and `created_at` are never
/// written through this struct.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFields {
    pub status: String,
    pub website: String,
    pub skills: Vec<String>,
    pub social: SocialLinks,
    pub extra: Map<String, Value>,
}

/// Read shape for the profile routes: the profile plus the owning user's
/// name and avatar. `owner` is null when the user record is gone.
#[derive(Debug, Clone, Serialize)]
pub struct PopulatedProfile {
    #[serde(flatten)]
    pub profile: Profile,
    pub owner: Option<OwnerSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnerSummary {
    pub name: String,
    pub avatar: Option<String>,
}
