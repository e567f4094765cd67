use std::env;
use std::sync::Arc;

use anyhow::Context;
use codeforge_server::api::{AppState, create_router};
use codeforge_server::db;
use judge_orchestrator::EvaluationConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    info!("starting codeforge server");

    let config_path = env::var("JUDGE_CONFIG").unwrap_or_else(|_| "judge.toml".to_string());
    info!(path = %config_path, "loading evaluation config");
    let config = EvaluationConfig::from_file(&config_path)
        .with_context(|| format!("failed to load evaluation config from {config_path}"))?;

    info!(
        base_url = %config.execution.base_url,
        poll_interval_ms = config.execution.poll_interval_ms,
        max_poll_rounds = config.execution.max_poll_rounds,
        "execution service configured"
    );

    let pool = db::init_pool_and_migrate()
        .await
        .context("failed to initialize database")?;
    info!("database pool ready, migrations applied");

    let state = Arc::new(AppState::new(pool, &config.execution));
    let router = create_router(state);

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(addr = %bind_addr, "server is ready, press Ctrl+C to shut down");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received, stopping server");
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
