use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{Education, Experience, ListEdit, Profile, ProfileFields, ProfileOwner, Social, User};
use super::store::ProfileStore;

/// Profile columns joined with the owner's public fields.
/// Every query aliases `profiles` as `p` and `users` as `u`.
const PROFILE_COLUMNS: &str = r#"
    p.id, p.user_id, u.name AS user_name, u.avatar AS user_avatar,
    p.company, p.website, p.location, p.bio, p.status, p.githubusername,
    p.skills, p.social, p.experiences, p.education, p.created_at, p.updated_at
"#;

#[derive(Debug, FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    user_name: String,
    user_avatar: Option<String>,
    company: Option<String>,
    website: Option<String>,
    location: Option<String>,
    bio: Option<String>,
    status: String,
    githubusername: Option<String>,
    skills: Vec<String>,
    social: Json<Social>,
    experiences: Json<Vec<Experience>>,
    education: Json<Vec<Education>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            user: ProfileOwner {
                id: row.user_id,
                name: row.user_name,
                avatar: row.user_avatar,
            },
            company: row.company,
            website: row.website,
            location: row.location,
            bio: row.bio,
            status: row.status,
            githubusername: row.githubusername,
            skills: row.skills,
            social: row.social.0,
            experiences: row.experiences.0,
            education: row.education.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL-backed profile store
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM profiles p JOIN users u ON u.id = p.user_id WHERE p.user_id = $1",
            PROFILE_COLUMNS
        );
        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Profile::from))
    }

    async fn list(&self) -> Result<Vec<Profile>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM profiles p JOIN users u ON u.id = p.user_id ORDER BY p.created_at, p.id",
            PROFILE_COLUMNS
        );
        let rows = sqlx::query_as::<_, ProfileRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn upsert(&self, user_id: Uuid, fields: ProfileFields) -> Result<Profile, DatabaseError> {
        // One statement, so two first-time writers cannot both insert.
        // COALESCE keeps stored values for fields the request left out and
        // jsonb `||` does the same per key inside `social`.
        let sql = format!(
            r#"
            WITH p AS (
                INSERT INTO profiles
                    (id, user_id, company, website, location, bio, status, githubusername, skills, social)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10::jsonb)
                ON CONFLICT (user_id) DO UPDATE SET
                    company = COALESCE($3, profiles.company),
                    website = COALESCE($4, profiles.website),
                    location = COALESCE($5, profiles.location),
                    bio = COALESCE($6, profiles.bio),
                    status = $7,
                    githubusername = COALESCE($8, profiles.githubusername),
                    skills = $9,
                    social = profiles.social || $10::jsonb,
                    updated_at = now()
                RETURNING *
            )
            SELECT {} FROM p JOIN users u ON u.id = p.user_id
            "#,
            PROFILE_COLUMNS
        );

        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(fields.company)
            .bind(fields.website)
            .bind(fields.location)
            .bind(fields.bio)
            .bind(fields.status)
            .bind(fields.githubusername)
            .bind(fields.skills)
            .bind(Json(fields.social))
            .fetch_one(&self.pool)
            .await?;

        Ok(Profile::from(row))
    }

    async fn edit_lists(&self, user_id: Uuid, edit: ListEdit) -> Result<Option<Profile>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent edits of the same profile
        let sql = format!(
            "SELECT {} FROM profiles p JOIN users u ON u.id = p.user_id WHERE p.user_id = $1 FOR UPDATE OF p",
            PROFILE_COLUMNS
        );
        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        let mut profile = Profile::from(row);
        if profile.apply(edit) {
            sqlx::query(
                "UPDATE profiles SET experiences = $2, education = $3, updated_at = $4 WHERE user_id = $1",
            )
            .bind(user_id)
            .bind(Json(&profile.experiences))
            .bind(Json(&profile.education))
            .bind(profile.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(profile))
    }

    async fn delete_account(&self, user_id: Uuid) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let profiles = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let users = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        tracing::info!(
            "Deleted account {} (profiles: {}, users: {})",
            user_id,
            profiles,
            users
        );
        Ok(())
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, avatar, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
