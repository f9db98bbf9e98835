use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full application router
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/profile", profile_routes())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    // Global middleware
    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

/// Routes mounted under /api/profile. Public and protected methods share
/// paths, so the auth layer is attached per method router.
fn profile_routes() -> Router<AppState> {
    let auth = || middleware::from_fn(jwt_auth_middleware);

    Router::new()
        .route(
            "/",
            get(public::list_profiles).merge(
                post(protected::upsert_profile)
                    .delete(protected::delete_account)
                    .route_layer(auth()),
            ),
        )
        .route("/me", get(protected::current_profile).route_layer(auth()))
        .route("/user/:user_id", get(public::profile_by_user))
        .route("/experiences", put(protected::add_experience).route_layer(auth()))
        .route(
            "/experiences/:exp_id",
            delete(protected::remove_experience).route_layer(auth()),
        )
        .route("/education", put(protected::add_education).route_layer(auth()))
        .route(
            "/education/:edu_id",
            delete(protected::remove_education).route_layer(auth()),
        )
        .route("/github/:username", get(public::github_repos))
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Profile API (Rust)",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "profiles": "GET /api/profile, GET /api/profile/user/:user_id (public)",
            "me": "GET|POST|DELETE /api/profile[/me] (token required)",
            "experiences": "PUT /api/profile/experiences, DELETE /api/profile/experiences/:exp_id (token required)",
            "education": "PUT /api/profile/education, DELETE /api/profile/education/:edu_id (token required)",
            "github": "GET /api/profile/github/:username (public)",
            "health": "GET /health (public)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
