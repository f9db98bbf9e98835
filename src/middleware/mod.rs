pub mod auth;
pub mod validated_json;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use validated_json::ValidatedJson;
