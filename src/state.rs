use std::sync::Arc;

use crate::database::ProfileStore;
use crate::services::GithubClient;

/// Shared handles cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub github: GithubClient,
}

impl AppState {
    pub fn new(store: Arc<dyn ProfileStore>, github: GithubClient) -> Self {
        Self { store, github }
    }
}
