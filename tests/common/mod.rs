// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, NaiveDate, Utc};
use life_points::config::Config;
use life_points::models::{LevelLadder, Page, PropertyValue, SourceRegistry};
use life_points::routes::create_router;
use life_points::services::{DashboardService, InMemoryProvider, PointsService};
use life_points::time_utils::{format_date, parse_date};
use life_points::AppState;
use std::sync::Arc;

/// Backing database of a built-in source.
#[allow(dead_code)]
pub fn database_of(source_id: &str) -> String {
    SourceRegistry::builtin()
        .get(source_id)
        .unwrap_or_else(|| panic!("no built-in source {source_id}"))
        .database_id
        .clone()
}

/// Built-in sources served by `provider`.
#[allow(dead_code)]
pub fn points_service(provider: Arc<InMemoryProvider>) -> PointsService {
    PointsService::new(provider, Arc::new(SourceRegistry::builtin()))
}

/// Date the test app treats as today (a Wednesday).
#[allow(dead_code)]
pub fn fixed_today() -> NaiveDate {
    parse_date("2024-05-01").unwrap()
}

/// Create a test app around an in-memory provider, pinned to [`fixed_today`].
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(provider: InMemoryProvider) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let dashboard = DashboardService::new(
        points_service(Arc::new(provider)),
        Arc::new(LevelLadder::builtin()),
        config.history_days,
    );

    let state = Arc::new(AppState {
        config,
        dashboard,
        clock: fixed_today,
    });

    (create_router(state.clone()), state)
}

fn created() -> DateTime<Utc> {
    "2021-01-01T00:00:00Z".parse().unwrap()
}

/// A finished task started on `date`.
#[allow(dead_code)]
pub fn task(id: &str, date: NaiveDate) -> Page {
    Page::new(id, created())
        .with_property("Start", PropertyValue::date(&format_date(date)))
        .with_property("State", PropertyValue::status("Done"))
}

/// A book finished on `date`.
#[allow(dead_code)]
pub fn book(id: &str, date: NaiveDate) -> Page {
    Page::new(id, created()).with_property("読了日", PropertyValue::date(&format_date(date)))
}

/// An insight page created at `created_time`.
#[allow(dead_code)]
pub fn insight(id: &str, created_time: &str) -> Page {
    Page::new(id, created_time.parse().unwrap())
}

/// A health-tracker row for `date` with optional light grade and step count.
#[allow(dead_code)]
pub fn health(id: &str, date: NaiveDate, light: Option<&str>, steps: Option<f64>) -> Page {
    let mut page = Page::new(id, created()).with_property("Date", PropertyValue::date(&format_date(date)));
    if let Some(grade) = light {
        page = page.with_property("光", PropertyValue::select(grade));
    }
    if let Some(steps) = steps {
        page = page.with_property("歩数", PropertyValue::number(steps));
    }
    page
}
