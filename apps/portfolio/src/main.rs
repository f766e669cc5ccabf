mod api_client;
mod config;
mod contact;
mod errors;
mod models;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::{health::check_backend, ApiClient};
use crate::config::{AppVariant, Config};
use crate::contact::ValidationRules;
use crate::models::portfolio::PortfolioData;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting portfolio v{} (variant: {}, default theme: {})",
        env!("CARGO_PKG_VERSION"),
        config.variant,
        config.default_theme
    );

    let portfolio = PortfolioData::load()?;
    info!("Portfolio data loaded for {}", portfolio.personal.name);

    let api = ApiClient::new(
        config.backend_url.as_deref(),
        Duration::from_secs(config.request_timeout_secs),
    )
    .context("Failed to build HTTP client")?;
    if api.is_configured() {
        info!(
            "Contact backend configured (timeout {}s)",
            config.request_timeout_secs
        );
    } else {
        warn!("No usable BACKEND_URL; contact submissions will report network errors");
    }

    let backend_status = match config.variant {
        AppVariant::HealthCheck => Some(check_backend(&api).await),
        AppVariant::ThemeToggle => None,
    };

    let rules = ValidationRules {
        min_message_length: config.min_message_length,
    };
    let state = AppState::new(
        config.clone(),
        portfolio,
        Arc::new(api),
        rules,
        backend_status,
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
