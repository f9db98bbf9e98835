use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{ListEdit, Profile, ProfileFields, User};
use super::store::ProfileStore;

#[derive(Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    // keyed by owning user id
    profiles: HashMap<Uuid, Profile>,
}

impl MemoryState {
    /// Refresh the embedded owner so renamed users show up like a join would
    fn joined(&self, profile: &Profile) -> Option<Profile> {
        let user = self.users.get(&profile.user.id)?;
        let mut profile = profile.clone();
        profile.user = user.owner();
        Some(profile)
    }
}

/// In-process store with the same semantics as the PostgreSQL one.
/// Writes take the single write lock, which makes upsert atomic.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user, standing in for the authentication service
    pub async fn insert_user(&self, user: User) {
        self.state.write().await.users.insert(user.id, user);
    }

    pub async fn profile_count(&self) -> usize {
        self.state.read().await.profiles.len()
    }

    /// Make `health_check` fail, as a lost database connection would
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.profiles.get(&user_id).and_then(|p| state.joined(p)))
    }

    async fn list(&self) -> Result<Vec<Profile>, DatabaseError> {
        let state = self.state.read().await;
        let mut profiles: Vec<Profile> = state
            .profiles
            .values()
            .filter_map(|p| state.joined(p))
            .collect();
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(profiles)
    }

    async fn upsert(&self, user_id: Uuid, fields: ProfileFields) -> Result<Profile, DatabaseError> {
        let mut state = self.state.write().await;
        let owner = state
            .users
            .get(&user_id)
            .map(User::owner)
            .ok_or_else(|| DatabaseError::QueryError(format!("no user {} to own the profile", user_id)))?;

        let profile = match state.profiles.get_mut(&user_id) {
            Some(existing) => {
                existing.merge(fields);
                existing.user = owner;
                existing.clone()
            }
            None => {
                let created = Profile::create(owner, fields);
                state.profiles.insert(user_id, created.clone());
                created
            }
        };
        Ok(profile)
    }

    async fn edit_lists(&self, user_id: Uuid, edit: ListEdit) -> Result<Option<Profile>, DatabaseError> {
        let mut state = self.state.write().await;
        let Some(profile) = state.profiles.get_mut(&user_id) else {
            return Ok(None);
        };
        profile.apply(edit);
        let profile = profile.clone();
        Ok(state.joined(&profile))
    }

    async fn delete_account(&self, user_id: Uuid) -> Result<(), DatabaseError> {
        let mut state = self.state.write().await;
        state.profiles.remove(&user_id);
        state.users.remove(&user_id);
        Ok(())
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self.state.read().await.users.get(&user_id).cloned())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DatabaseError::ConnectionError("store marked unavailable".to_string()));
        }
        Ok(())
    }
}
