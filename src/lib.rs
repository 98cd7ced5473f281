// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Life-Points: a gamified point total for everyday activity
//!
//! This crate provides the backend API that aggregates records from a
//! pages database into per-period point totals, a level, and a daily
//! history for the dashboard widget.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use chrono::NaiveDate;
use config::Config;
use services::DashboardService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub dashboard: DashboardService,
    /// Source of "today" in UTC+9; [`time_utils::today`] outside tests
    pub clock: fn() -> NaiveDate,
}
