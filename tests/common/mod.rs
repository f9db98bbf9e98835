#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use profile_api_rust::auth::{generate_jwt, Claims};
use profile_api_rust::config::{config, AppConfig, GithubConfig};
use profile_api_rust::database::{models::User, MemoryStore};
use profile_api_rust::services::GithubClient;
use profile_api_rust::{app, AppState};

/// Router over an in-memory store, driven without a socket
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        // Nothing listens on the discard port; only the GitHub tests override it
        Self::with_github_base("http://127.0.0.1:9")
    }

    pub fn with_github_base(api_base: &str) -> Self {
        let store = Arc::new(MemoryStore::new());
        let github = GithubClient::new(&GithubConfig {
            api_base: api_base.to_string(),
            request_timeout_secs: 5,
            ..GithubConfig::default()
        })
        .expect("github client");

        let mut config = AppConfig::from_env();
        config.api.enable_request_logging = false;

        let router = app(AppState::new(store.clone(), github), &config);
        Self { store, router }
    }

    /// Register a user in the store and mint a token for it
    pub async fn create_user(&self, name: &str) -> TestUser {
        let id = Uuid::new_v4();
        self.store
            .insert_user(User {
                id,
                name: name.to_string(),
                email: format!("{}@example.com", id.simple()),
                avatar: Some(format!("//www.gravatar.com/avatar/{}", id.simple())),
                created_at: Utc::now(),
            })
            .await;
        TestUser {
            id,
            token: token_for(id),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-auth-token", token);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        self.send(request).await
    }

    /// Drive a prepared request through the router and decode the JSON body
    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("router call failed")?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .with_context(|| format!("non-JSON body: {}", String::from_utf8_lossy(&bytes)))?
        };
        Ok((status, value))
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::DELETE, uri, Some(token), None).await
    }
}

pub fn token_for(user_id: Uuid) -> String {
    let security = &config().security;
    generate_jwt(&Claims::new(user_id, 1), &security.jwt_secret).expect("token")
}

pub fn profile_body() -> Value {
    serde_json::json!({
        "company": "Acme",
        "status": "Developer",
        "website": "https://ada.dev",
        "skills": "HTML , CSS , Rust",
        "location": "London",
        "githubusername": "ada",
        "twitter": "https://twitter.com/ada",
        "youtube": "https://youtube.com/ada"
    })
}
