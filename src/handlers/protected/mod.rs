// handlers/protected/mod.rs - Protected handlers (token required)
//
// Every handler here reads the caller from the `AuthUser` extension that
// `jwt_auth_middleware` inserts, and only ever touches the caller's profile.

pub mod history;
pub mod profile;

pub use history::{add_education, add_experience, remove_education, remove_experience};
pub use profile::{current_profile, delete_account, upsert_profile};
