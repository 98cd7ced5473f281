// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Life-Points API Server
//!
//! Turns records in a pages database into a point total, shown per
//! day/week/month/all-time with a level meter and a 30-day trend.

use life_points::{
    config::Config,
    models::{LevelLadder, SourceRegistry},
    services::{DashboardService, InMemoryProvider, NotionClient, PageProvider, PointsService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Life-Points API");

    // Pick the page provider: fixtures for offline work, the live API otherwise
    let provider: Arc<dyn PageProvider> = match &config.fixture_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Serving pages from fixture");
            Arc::new(InMemoryProvider::load_from_file(path)?)
        }
        None => {
            tracing::info!(url = %config.notion_api_url, "Using pages API");
            Arc::new(NotionClient::new(&config)?)
        }
    };

    let registry = Arc::new(SourceRegistry::builtin());
    tracing::info!(count = registry.sources().len(), "Point sources loaded");

    let points = PointsService::new(provider, registry);
    let dashboard = DashboardService::new(
        points,
        Arc::new(LevelLadder::builtin()),
        config.history_days,
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        dashboard,
        clock: life_points::time_utils::today,
    });

    // Build router
    let app = life_points::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("life_points=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
