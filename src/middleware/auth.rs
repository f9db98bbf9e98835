use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{validate_jwt, Claims};
use crate::config;
use crate::error::ApiError;

/// Authenticated caller extracted from the token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { id: claims.user.id }
    }
}

/// JWT authentication middleware that validates tokens and injects `AuthUser`
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_headers(&headers)
        .ok_or_else(|| ApiError::unauthorized("No token, authorization denied"))?;

    let claims = validate_jwt(&token, &config::config().security.jwt_secret).map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        ApiError::unauthorized("Token is not valid")
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Token from `x-auth-token`, falling back to `Authorization: Bearer`
fn extract_token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get("x-auth-token") {
        let token = value.to_str().ok()?.trim();
        return (!token.is_empty()).then(|| token.to_string());
    }

    let auth_str = headers.get("authorization")?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}
