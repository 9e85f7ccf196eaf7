use tracing::debug;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::profile::{
    Education, Experience, OwnerSummary, PopulatedProfile, Profile, ProfileFields,
};
use crate::store::Store;

pub const NO_PROFILE_FOR_USER: &str = "There is no profile for this user";
pub const NO_USER_FOR_PROFILE: &str = "there is no user for this profile";

/// Attaches the owning user's name and avatar to a profile.
async fn populate(store: &dyn Store, profile: Profile) -> Result<PopulatedProfile, ApiError> {
    let owner = store.find_user(profile.user).await?.map(|user| OwnerSummary {
        name: user.name,
        avatar: user.avatar,
    });
    Ok(PopulatedProfile { profile, owner })
}

pub async fn own_profile(store: &dyn Store, user_id: Uuid) -> Result<PopulatedProfile, ApiError> {
    let profile = store
        .find_profile_by_user(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NO_PROFILE_FOR_USER.to_string()))?;
    populate(store, profile).await
}

/// Public lookup by user id. A malformed id yields the same not-found shape
/// as a well-formed but unmatched one; the two are only told apart in logs.
pub async fn profile_by_user(store: &dyn Store, raw_id: &str) -> Result<PopulatedProfile, ApiError> {
    let user_id = match Uuid::parse_str(raw_id) {
        Ok(id) => id,
        Err(err) => {
            debug!(raw_id, %err, "malformed user id on public profile lookup");
            return Err(ApiError::NotFound(NO_USER_FOR_PROFILE.to_string()));
        }
    };
    let profile = store
        .find_profile_by_user(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NO_USER_FOR_PROFILE.to_string()))?;
    populate(store, profile).await
}

pub async fn all_profiles(store: &dyn Store) -> Result<Vec<PopulatedProfile>, ApiError> {
    let mut populated = Vec::new();
    for profile in store.list_profiles().await? {
        populated.push(populate(store, profile).await?);
    }
    Ok(populated)
}

pub async fn upsert_profile(
    store: &dyn Store,
    user_id: Uuid,
    fields: &ProfileFields,
) -> Result<Profile, ApiError> {
    Ok(store.upsert_profile(user_id, fields).await?)
}

/// Inserts the entry at the front: the sub-collections are ordered
/// newest-first.
pub async fn add_experience(
    store: &dyn Store,
    user_id: Uuid,
    entry: Experience,
) -> Result<Profile, ApiError> {
    let mut profile = store
        .find_profile_by_user(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NO_PROFILE_FOR_USER.to_string()))?;
    profile.experience.insert(0, entry);
    store.save_profile(&profile).await?;
    Ok(profile)
}

fn parse_entry_id(raw_id: &str, collection: &str) -> Option<Uuid> {
    match Uuid::parse_str(raw_id) {
        Ok(id) => Some(id),
        Err(err) => {
            debug!(raw_id, collection, %err, "malformed entry id on removal");
            None
        }
    }
}

/// Removes the entry whose stable identifier matches. No match (including a
/// malformed identifier) leaves the collection untouched and reports
/// not-found; removal never falls back to a positional guess.
pub async fn remove_experience(
    store: &dyn Store,
    user_id: Uuid,
    raw_id: &str,
) -> Result<Profile, ApiError> {
    let mut profile = store
        .find_profile_by_user(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NO_PROFILE_FOR_USER.to_string()))?;

    let position = parse_entry_id(raw_id, "experience")
        .and_then(|entry_id| profile.experience.iter().position(|e| e.id == entry_id))
        .ok_or_else(|| ApiError::NotFound("Experience entry not found".to_string()))?;

    profile.experience.remove(position);
    store.save_profile(&profile).await?;
    Ok(profile)
}

pub async fn add_education(
    store: &dyn Store,
    user_id: Uuid,
    entry: Education,
) -> Result<Profile, ApiError> {
    let mut profile = store
        .find_profile_by_user(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NO_PROFILE_FOR_USER.to_string()))?;
    profile.education.insert(0, entry);
    store.save_profile(&profile).await?;
    Ok(profile)
}

pub async fn remove_education(
    store: &dyn Store,
    user_id: Uuid,
    raw_id: &str,
) -> Result<Profile, ApiError> {
    let mut profile = store
        .find_profile_by_user(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NO_PROFILE_FOR_USER.to_string()))?;

    let position = parse_entry_id(raw_id, "education")
        .and_then(|entry_id| profile.education.iter().position(|e| e.id == entry_id))
        .ok_or_else(|| ApiError::NotFound("Education entry not found".to_string()))?;

    profile.education.remove(position);
    store.save_profile(&profile).await?;
    Ok(profile)
}

/// Deletes the profile, then the user record. Best-effort sequential: a
/// failure after the first delete leaves no profile pointing at a live user.
pub async fn delete_account(store: &dyn Store, user_id: Uuid) -> Result<(), ApiError> {
    store.delete_profile_by_user(user_id).await?;
    store.delete_user(user_id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::SocialLinks;
    use crate::models::user::User;
    use crate::store::memory::MemoryStore;
    use chrono::{NaiveDate, Utc};
    use serde_json::Map;

    fn seed_user(store: &MemoryStore) -> Uuid {
        let id = Uuid::new_v4();
        store.insert_user(User {
            id,
            name: "Ada".to_string(),
            avatar: Some("https://example.com/a.png".to_string()),
            created_at: Utc::now(),
        });
        id
    }

    fn fields() -> ProfileFields {
        ProfileFields {
            status: "developer".to_string(),
            website: String::new(),
            skills: vec!["rust".to_string()],
            social: SocialLinks::default(),
            extra: Map::new(),
        }
    }

    fn experience(title: &str) -> Experience {
        Experience {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: None,
            from: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            to: None,
            current: false,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_added_entries_are_newest_first() {
        let store = MemoryStore::default();
        let user = seed_user(&store);
        store.upsert_profile(user, &fields()).await.unwrap();

        add_experience(&store, user, experience("first")).await.unwrap();
        let profile = add_experience(&store, user, experience("second"))
            .await
            .unwrap();

        let titles: Vec<_> = profile.experience.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_remove_keeps_relative_order_of_survivors() {
        let store = MemoryStore::default();
        let user = seed_user(&store);
        store.upsert_profile(user, &fields()).await.unwrap();

        add_experience(&store, user, experience("a")).await.unwrap();
        let with_b = add_experience(&store, user, experience("b")).await.unwrap();
        add_experience(&store, user, experience("c")).await.unwrap();

        // order is [c, b, a]; remove the middle entry
        let b_id = with_b.experience[0].id;
        let profile = remove_experience(&store, user, &b_id.to_string())
            .await
            .unwrap();

        let titles: Vec<_> = profile.experience.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a"]);
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_not_found_and_removes_nothing() {
        let store = MemoryStore::default();
        let user = seed_user(&store);
        store.upsert_profile(user, &fields()).await.unwrap();
        add_experience(&store, user, experience("only")).await.unwrap();

        let err = remove_experience(&store, user, &Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let profile = store.find_profile_by_user(user).await.unwrap().unwrap();
        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.experience[0].title, "only");
    }

    #[tokio::test]
    async fn test_remove_malformed_id_does_not_delete_the_last_entry() {
        let store = MemoryStore::default();
        let user = seed_user(&store);
        store.upsert_profile(user, &fields()).await.unwrap();
        add_experience(&store, user, experience("keep-me")).await.unwrap();

        let err = remove_experience(&store, user, "not-a-uuid").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let profile = store.find_profile_by_user(user).await.unwrap().unwrap();
        assert_eq!(profile.experience.len(), 1);
    }

    #[tokio::test]
    async fn test_add_entry_without_profile_is_not_found() {
        let store = MemoryStore::default();
        let user = seed_user(&store);

        let err = add_experience(&store, user, experience("x")).await.unwrap_err();
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, NO_PROFILE_FOR_USER),
            other => panic!("expected not-found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_account_removes_profile_and_user() {
        let store = MemoryStore::default();
        let user = seed_user(&store);
        store.upsert_profile(user, &fields()).await.unwrap();

        delete_account(&store, user).await.unwrap();

        assert!(store.find_profile_by_user(user).await.unwrap().is_none());
        assert!(store.find_user(user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_populated_reads_attach_owner() {
        let store = MemoryStore::default();
        let user = seed_user(&store);
        store.upsert_profile(user, &fields()).await.unwrap();

        let populated = own_profile(&store, user).await.unwrap();
        let owner = populated.owner.unwrap();
        assert_eq!(owner.name, "Ada");
        assert_eq!(owner.avatar.as_deref(), Some("https://example.com/a.png"));
    }

    #[tokio::test]
    async fn test_malformed_and_unmatched_user_id_share_a_shape() {
        let store = MemoryStore::default();

        let malformed = profile_by_user(&store, "not-a-uuid").await.unwrap_err();
        let unmatched = profile_by_user(&store, &Uuid::new_v4().to_string())
            .await
            .unwrap_err();

        match (malformed, unmatched) {
            (ApiError::NotFound(a), ApiError::NotFound(b)) => {
                assert_eq!(a, b);
                assert_eq!(a, NO_USER_FOR_PROFILE);
            }
            other => panic!("expected two not-found errors, got {other:?}"),
        }
    }
}
