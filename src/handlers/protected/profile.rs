use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::api::ProfileRequest;
use crate::database::models::{Profile, ProfileFields};
use crate::error::ApiError;
use crate::middleware::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/profile/me - The caller's own profile
pub async fn current_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Profile>, ApiError> {
    state
        .store
        .find_by_user(auth.id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::bad_request("There is no profile for this user"))
}

/// POST /api/profile - Create the caller's profile or update it in place
///
/// Only fields present in the body are written; anything omitted keeps its
/// stored value.
pub async fn upsert_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<ProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let fields = ProfileFields::from(payload);
    let profile = state.store.upsert(auth.id, fields).await?;
    tracing::debug!("Saved profile {} for user {}", profile.id, auth.id);
    Ok(Json(profile))
}

/// DELETE /api/profile - Remove the caller's profile and account
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    // TODO: remove the user's posts once the posts module exists
    state.store.delete_account(auth.id).await?;
    Ok(Json(json!({ "msg": "User deleted" })))
}
