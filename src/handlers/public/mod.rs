// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Read-only profile browsing and the GitHub repository proxy.

pub mod github;
pub mod profiles;

pub use github::github_repos;
pub use profiles::{list_profiles, profile_by_user};
