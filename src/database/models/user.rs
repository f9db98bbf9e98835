use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::profile::ProfileOwner;

/// Account owning a profile. Created by the authentication service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn owner(&self) -> ProfileOwner {
        ProfileOwner {
            id: self.id,
            name: self.name.clone(),
            avatar: self.avatar.clone(),
        }
    }
}
