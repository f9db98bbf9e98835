use async_trait::async_trait;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{ListEdit, Profile, ProfileFields, User};

/// Persistence contract behind the profile routes.
///
/// Every method is keyed by the owning user's id. Implementations must make
/// `upsert` atomic per user so concurrent first writes yield one profile.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Profile owned by `user_id`, with the owner's name and avatar attached
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, DatabaseError>;

    /// All profiles, oldest first
    async fn list(&self) -> Result<Vec<Profile>, DatabaseError>;

    /// Create the profile for `user_id`, or merge `fields` into the existing one
    async fn upsert(&self, user_id: Uuid, fields: ProfileFields) -> Result<Profile, DatabaseError>;

    /// Apply a history list edit. `Ok(None)` when the user has no profile.
    async fn edit_lists(&self, user_id: Uuid, edit: ListEdit) -> Result<Option<Profile>, DatabaseError>;

    /// Remove the user's profile and then the user record
    async fn delete_account(&self, user_id: Uuid) -> Result<(), DatabaseError>;

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
