// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod dashboard;
pub mod fetcher;
pub mod fixture;
pub mod notion;
pub mod points;
pub mod provider;

pub use dashboard::{DashboardResponse, DashboardService, PeriodSummary, PeriodWindows};
pub use fixture::{FixtureError, InMemoryProvider};
pub use notion::NotionClient;
pub use points::PointsService;
pub use provider::{PageProvider, QueryRequest, QueryResponse};
