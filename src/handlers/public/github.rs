use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/profile/github/:username - Latest repositories of a GitHub user
///
/// The upstream JSON is relayed untouched. Any non-200 answer from GitHub
/// becomes 404 "No Github profile found".
pub async fn github_repos(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let repos = state.github.recent_repos(&username).await?;
    Ok(Json(repos))
}
