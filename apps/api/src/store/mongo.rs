use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, to_bson, Bson};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use uuid::Uuid;

use super::Store;
use crate::models::profile::{Profile, ProfileFields};
use crate::models::user::User;

/// MongoDB-backed document store. UUIDs are stored as strings so filters
/// stay plain string equality.
pub struct MongoStore {
    users: Collection<User>,
    profiles: Collection<Profile>,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self {
            users: db.collection("users"),
            profiles: db.collection("profiles"),
        }
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.find_one(doc! { "_id": id.to_string() }).await?)
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        self.users
            .delete_one(doc! { "_id": id.to_string() })
            .await?;
        Ok(())
    }

    async fn find_profile_by_user(&self, user_id: Uuid) -> Result<Option<Profile>> {
        Ok(self
            .profiles
            .find_one(doc! { "user": user_id.to_string() })
            .await?)
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        let cursor = self.profiles.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn upsert_profile(&self, user_id: Uuid, fields: &ProfileFields) -> Result<Profile> {
        let mut set = doc! {
            "status": fields.status.as_str(),
            "website": fields.website.as_str(),
            "skills": to_bson(&fields.skills)?,
            "social": to_bson(&fields.social)?,
        };
        for (key, value) in &fields.extra {
            set.insert(key, to_bson(value)?);
        }
        // $setOnInsert keeps identity and created_at stable across re-submits.
        let on_insert = doc! {
            "_id": Uuid::new_v4().to_string(),
            "user": user_id.to_string(),
            "experience": Bson::Array(vec![]),
            "education": Bson::Array(vec![]),
            "created_at": to_bson(&Utc::now())?,
        };

        self.profiles
            .find_one_and_update(
                doc! { "user": user_id.to_string() },
                doc! { "$set": set, "$setOnInsert": on_insert },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| anyhow!("profile upsert returned no document"))
    }

    async fn save_profile(&self, profile: &Profile) -> Result<()> {
        self.profiles
            .replace_one(doc! { "_id": profile.id.to_string() }, profile)
            .await?;
        Ok(())
    }

    async fn delete_profile_by_user(&self, user_id: Uuid) -> Result<()> {
        self.profiles
            .delete_one(doc! { "user": user_id.to_string() })
            .await?;
        Ok(())
    }
}
