use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity record owned by the registration flow. This API only reads it
/// (to populate profile responses) and deletes it alongside the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}
