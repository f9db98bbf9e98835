use anyhow::Context;
use clap::Args;
use std::sync::Arc;

use crate::config::config;
use crate::database::{DatabaseManager, PgProfileStore};
use crate::services::GithubClient;
use crate::state::AppState;

const DEFAULT_PORT: u16 = 5000;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides PROFILE_API_PORT / PORT)")]
    pub port: Option<u16>,
}

/// Port from the flag, then PROFILE_API_PORT, then PORT
fn resolve_port(flag: Option<u16>) -> u16 {
    flag.or_else(|| {
        std::env::var("PROFILE_API_PORT")
            .ok()
            .or_else(|| std::env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
    })
    .unwrap_or(DEFAULT_PORT)
}

pub async fn handle(args: ServeArgs) -> anyhow::Result<()> {
    let config = config();
    tracing::info!("Starting Profile API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set outside development");
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    if config.database.run_migrations {
        DatabaseManager::migrate(&pool)
            .await
            .context("failed to apply migrations")?;
    }

    let github = GithubClient::new(&config.github).context("failed to build GitHub client")?;
    let state = AppState::new(Arc::new(PgProfileStore::new(pool.clone())), github);
    let app = crate::app(state, config);

    let bind_addr = format!("0.0.0.0:{}", resolve_port(args.port));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Profile API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("Database pool closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
