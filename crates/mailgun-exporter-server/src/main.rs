//! Mailgun exporter binary.
//!
//! Loads config, then serves `/`, `/healthz` and the metrics path. Each scrape
//! of the metrics path queries Mailgun for every configured domain.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use mailgun_exporter_server::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = config::Args::parse();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting mailgun exporter");

    // Nothing binds until config is complete.
    let cfg = match config::load(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(kind = e.kind().as_str(), error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    let listen = cfg.listen.clone();
    let metrics_path = cfg.metrics_path.clone();
    tracing::debug!(config = ?cfg, "configuration loaded");

    let state = match AppState::new(cfg) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(kind = e.kind().as_str(), error = %e, "startup failed");
            return ExitCode::FAILURE;
        }
    };
    let app = router::build_router(state);

    tracing::info!(%listen, %metrics_path, "starting HTTP server");
    let listener = match tokio::net::TcpListener::bind(listen.as_str()).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%listen, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
