// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard API routes.

use crate::error::Result;
use crate::services::DashboardResponse;
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::sync::Arc;

/// Public API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/points", get(get_points).options(preflight))
}

/// Bare OPTIONS requests get an empty 200.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Points for every period, the level, and the daily history.
///
/// "Today" is read once per request, in UTC+9.
async fn get_points(State(state): State<Arc<AppState>>) -> Result<Json<DashboardResponse>> {
    let today = (state.clock)();
    tracing::debug!(today = %today, "Computing dashboard");

    let dashboard = state.dashboard.build(today).await?;
    Ok(Json(dashboard))
}
