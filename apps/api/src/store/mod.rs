#[cfg(test)]
pub mod memory;
pub mod mongo;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::profile::{Profile, ProfileFields};
use crate::models::user::User;

/// Document store operations the profile service depends on. Production
/// wires [`mongo::MongoStore`]; tests use the in-memory implementation.
/// The store serializes concurrent writes to the same document
/// (last-writer-wins); there is no cross-document transaction.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Deleting a missing user is not an error.
    async fn delete_user(&self, id: Uuid) -> Result<()>;

    async fn find_profile_by_user(&self, user_id: Uuid) -> Result<Option<Profile>>;

    async fn list_profiles(&self) -> Result<Vec<Profile>>;

    /// Atomic find-and-update-or-insert keyed by the owning user, returning
    /// the post-update document. On insert, identity, empty sub-collections
    /// and `created_at` are seeded; on update they are left untouched, so
    /// repeated identical upserts yield an identical document.
    async fn upsert_profile(&self, user_id: Uuid, fields: &ProfileFields) -> Result<Profile>;

    /// Persists a full profile document (sub-collection mutations).
    async fn save_profile(&self, profile: &Profile) -> Result<()>;

    /// Deleting a missing profile is not an error.
    async fn delete_profile_by_user(&self, user_id: Uuid) -> Result<()>;
}
