use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::GithubConfig;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("Invalid GitHub API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("GitHub answered {status} for user '{username}'")]
    UpstreamStatus { username: String, status: StatusCode },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Client for the GitHub REST API.
///
/// Built once at startup; credentials come from configuration and are sent
/// as basic auth on every request.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: Url,
    credentials: Option<(String, String)>,
    repo_limit: u8,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self, GithubError> {
        let api_base = Url::parse(&config.api_base)
            .map_err(|_| GithubError::InvalidBaseUrl(config.api_base.clone()))?;
        if api_base.cannot_be_a_base() {
            return Err(GithubError::InvalidBaseUrl(config.api_base.clone()));
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let credentials = match (&config.client_id, &config.client_secret) {
            (Some(id), Some(secret)) => Some((id.clone(), secret.clone())),
            _ => None,
        };

        Ok(Self {
            http,
            api_base,
            credentials,
            repo_limit: config.repo_limit,
        })
    }

    /// `{base}/users/{username}/repos?per_page=N&sort=created&direction=desc`
    fn repos_url(&self, username: &str) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["users", username, "repos"]);
        }
        url.query_pairs_mut()
            .append_pair("per_page", &self.repo_limit.to_string())
            .append_pair("sort", "created")
            .append_pair("direction", "desc");
        url
    }

    /// Most recently created public repositories of `username`, relayed as-is
    pub async fn recent_repos(&self, username: &str) -> Result<Value, GithubError> {
        let url = self.repos_url(username);
        tracing::debug!("Fetching GitHub repos: {}", url);

        let mut request = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some((id, secret)) = &self.credentials {
            request = request.basic_auth(id, Some(secret));
        }

        let response = request.send().await?;
        if response.status() != StatusCode::OK {
            return Err(GithubError::UpstreamStatus {
                username: username.to_string(),
                status: response.status(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
