use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::api::{EducationRequest, ExperienceRequest};
use crate::database::models::{Education, Experience, ListEdit, Profile};
use crate::error::ApiError;
use crate::middleware::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// Apply `edit` to the caller's profile. A caller without a profile is a
/// server error, matching how the list routes have always answered it.
async fn edit_caller_lists(
    state: &AppState,
    auth: &AuthUser,
    edit: Option<ListEdit>,
) -> Result<Json<Profile>, ApiError> {
    let profile = match edit {
        Some(edit) => state.store.edit_lists(auth.id, edit).await?,
        // nothing can match, so there is nothing to write
        None => state.store.find_by_user(auth.id).await?,
    };

    profile.map(Json).ok_or_else(|| {
        tracing::error!("List edit for user {} without a profile", auth.id);
        ApiError::server_error()
    })
}

/// PUT /api/profile/experiences - Add an experience entry at the top
pub async fn add_experience(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<ExperienceRequest>,
) -> Result<Json<Profile>, ApiError> {
    let entry = Experience::try_from(payload)?;
    edit_caller_lists(&state, &auth, Some(ListEdit::AddExperience(entry))).await
}

/// DELETE /api/profile/experiences/:exp_id
///
/// Unknown or malformed ids leave the list unchanged and still answer 200.
pub async fn remove_experience(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(exp_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let edit = Uuid::parse_str(&exp_id).ok().map(ListEdit::RemoveExperience);
    edit_caller_lists(&state, &auth, edit).await
}

/// PUT /api/profile/education - Add an education entry at the top
pub async fn add_education(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<EducationRequest>,
) -> Result<Json<Profile>, ApiError> {
    let entry = Education::try_from(payload)?;
    edit_caller_lists(&state, &auth, Some(ListEdit::AddEducation(entry))).await
}

/// DELETE /api/profile/education/:edu_id
pub async fn remove_education(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(edu_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let edit = Uuid::parse_str(&edu_id).ok().map(ListEdit::RemoveEducation);
    edit_caller_lists(&state, &auth, edit).await
}
