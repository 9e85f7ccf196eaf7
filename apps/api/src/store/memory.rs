use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::Store;
use crate::models::profile::{Profile, ProfileFields};
use crate::models::user::User;

/// In-memory store for tests. Upsert mirrors the MongoDB `$set` semantics:
/// named fields are replaced, extra fields are merged per key, identity and
/// `created_at` are only seeded on insert.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<Uuid, User>>,
    profiles: Mutex<HashMap<Uuid, Profile>>,
}

impl MemoryStore {
    pub fn insert_user(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        self.users.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn find_profile_by_user(&self, user_id: Uuid) -> Result<Option<Profile>> {
        Ok(self.profiles.lock().unwrap().get(&user_id).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        Ok(self.profiles.lock().unwrap().values().cloned().collect())
    }

    async fn upsert_profile(&self, user_id: Uuid, fields: &ProfileFields) -> Result<Profile> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles.entry(user_id).or_insert_with(|| Profile {
            id: Uuid::new_v4(),
            user: user_id,
            status: String::new(),
            website: String::new(),
            skills: vec![],
            social: Default::default(),
            experience: vec![],
            education: vec![],
            created_at: Utc::now(),
            extra: Default::default(),
        });

        profile.status = fields.status.clone();
        profile.website = fields.website.clone();
        profile.skills = fields.skills.clone();
        profile.social = fields.social.clone();
        for (key, value) in &fields.extra {
            profile.extra.insert(key.clone(), value.clone());
        }

        Ok(profile.clone())
    }

    async fn save_profile(&self, profile: &Profile) -> Result<()> {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.user, profile.clone());
        Ok(())
    }

    async fn delete_profile_by_user(&self, user_id: Uuid) -> Result<()> {
        self.profiles.lock().unwrap().remove(&user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::SocialLinks;
    use serde_json::{json, Map};

    fn fields(status: &str) -> ProfileFields {
        ProfileFields {
            status: status.to_string(),
            website: String::new(),
            skills: vec!["rust".to_string()],
            social: SocialLinks::default(),
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates_in_place() {
        let store = MemoryStore::default();
        let user = Uuid::new_v4();

        let first = store.upsert_profile(user, &fields("hacking")).await.unwrap();
        let second = store.upsert_profile(user, &fields("resting")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(second.status, "resting");
    }

    #[tokio::test]
    async fn test_upsert_merges_extra_fields_per_key() {
        let store = MemoryStore::default();
        let user = Uuid::new_v4();

        let mut with_bio = fields("x");
        with_bio.extra.insert("bio".to_string(), json!("hi"));
        store.upsert_profile(user, &with_bio).await.unwrap();

        let mut with_company = fields("x");
        with_company
            .extra
            .insert("company".to_string(), json!("acme"));
        let merged = store.upsert_profile(user, &with_company).await.unwrap();

        assert_eq!(merged.extra.get("bio"), Some(&json!("hi")));
        assert_eq!(merged.extra.get("company"), Some(&json!("acme")));
    }

    #[tokio::test]
    async fn test_delete_missing_documents_is_not_an_error() {
        let store = MemoryStore::default();
        store.delete_profile_by_user(Uuid::new_v4()).await.unwrap();
        store.delete_user(Uuid::new_v4()).await.unwrap();
    }
}
