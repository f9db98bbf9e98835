use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::database::models::Profile;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/profile - All profiles with owner name and avatar
pub async fn list_profiles(State(state): State<AppState>) -> Result<Json<Vec<Profile>>, ApiError> {
    let profiles = state.store.list().await?;
    Ok(Json(profiles))
}

/// GET /api/profile/user/:user_id - Profile of a given user
///
/// Unknown and malformed ids both answer 400 "Profile not found".
pub async fn profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let user_id = Uuid::parse_str(&user_id).map_err(|_| ApiError::bad_request("Profile not found"))?;

    state
        .store
        .find_by_user(user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::bad_request("Profile not found"))
}
