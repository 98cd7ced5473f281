// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Period comparison and dashboard response assembly.

use crate::error::AppError;
use crate::models::{DailyHistoryEntry, DateWindow, LevelInfo, LevelLadder, PeriodResult, SourceResult};
use crate::services::points::PointsService;
use crate::time_utils::{add_days, format_utc_rfc3339, month_end, month_start, parse_date, week_start};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// First day counted toward the all-time total.
pub const ALL_TIME_START: &str = "2021-01-01";

pub const VS_YESTERDAY: &str = "vs 昨日";
pub const VS_LAST_WEEK: &str = "vs 先週";
pub const VS_LAST_MONTH: &str = "vs 先月";

/// Every window the dashboard reports on, anchored at one "today".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodWindows {
    pub today: DateWindow,
    pub yesterday: DateWindow,
    pub week: DateWindow,
    pub previous_week: DateWindow,
    pub month: DateWindow,
    pub previous_month: DateWindow,
    pub all_time: DateWindow,
}

impl PeriodWindows {
    pub fn for_date(today: NaiveDate) -> Result<Self, AppError> {
        let this_week = week_start(today);
        let this_month = month_start(today);
        let last_month = add_days(this_month, -1);

        Ok(Self {
            today: DateWindow::day(today),
            yesterday: DateWindow::day(add_days(today, -1)),
            week: DateWindow::new(this_week, Some(add_days(this_week, 6))),
            previous_week: DateWindow::new(add_days(this_week, -7), Some(add_days(this_week, -1))),
            month: DateWindow::new(this_month, Some(month_end(today))),
            previous_month: DateWindow::new(month_start(last_month), Some(last_month)),
            all_time: DateWindow::new(parse_date(ALL_TIME_START)?, Some(today)),
        })
    }
}

/// One period as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PeriodSummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub points: u64,
    pub breakdown: Vec<SourceResult>,
    /// Points relative to the preceding period of equal length
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub comparison: Option<i64>,
    pub comparison_label: Option<String>,
    /// Some source hit the fetch cap, so `points` may be low
    pub truncated: bool,
}

impl PeriodSummary {
    /// Summary compared against the period just before it.
    pub fn compared(current: PeriodResult, previous: &PeriodResult, label: &str) -> Self {
        let comparison = current.total_points as i64 - previous.total_points as i64;
        Self {
            points: current.total_points,
            breakdown: current.breakdown,
            comparison: Some(comparison),
            comparison_label: Some(label.to_string()),
            truncated: current.truncated || previous.truncated,
        }
    }

    /// Summary with nothing to compare against.
    pub fn standalone(current: PeriodResult) -> Self {
        Self {
            points: current.total_points,
            breakdown: current.breakdown,
            comparison: None,
            comparison_label: None,
            truncated: current.truncated,
        }
    }
}

/// Body of `GET /api/points`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardResponse {
    pub today: PeriodSummary,
    pub week: PeriodSummary,
    pub month: PeriodSummary,
    pub total: PeriodSummary,
    pub level: LevelInfo,
    pub daily_history: Vec<DailyHistoryEntry>,
    pub generated_at: String,
}

/// Builds the full dashboard for a given day.
#[derive(Clone)]
pub struct DashboardService {
    points: PointsService,
    ladder: Arc<LevelLadder>,
    history_days: u32,
}

impl DashboardService {
    pub fn new(points: PointsService, ladder: Arc<LevelLadder>, history_days: u32) -> Self {
        Self {
            points,
            ladder,
            history_days,
        }
    }

    /// Compute every period and the daily history concurrently.
    ///
    /// Any failure fails the whole dashboard; partial results are never
    /// returned.
    pub async fn build(&self, today: NaiveDate) -> Result<DashboardResponse, AppError> {
        let windows = PeriodWindows::for_date(today)?;

        let (today_result, yesterday, week, previous_week, month, previous_month, all_time, history) =
            tokio::try_join!(
                self.points.calculate_points(windows.today),
                self.points.calculate_points(windows.yesterday),
                self.points.calculate_points(windows.week),
                self.points.calculate_points(windows.previous_week),
                self.points.calculate_points(windows.month),
                self.points.calculate_points(windows.previous_month),
                self.points.calculate_points(windows.all_time),
                self.points.daily_history(today, self.history_days),
            )?;

        let level = self.ladder.level_for(all_time.total_points);
        tracing::info!(
            today = %today,
            total_points = all_time.total_points,
            level = level.current.level,
            "Dashboard computed"
        );

        Ok(DashboardResponse {
            today: PeriodSummary::compared(today_result, &yesterday, VS_YESTERDAY),
            week: PeriodSummary::compared(week, &previous_week, VS_LAST_WEEK),
            month: PeriodSummary::compared(month, &previous_month, VS_LAST_MONTH),
            total: PeriodSummary::standalone(all_time),
            level,
            daily_history: history,
            generated_at: format_utc_rfc3339(Utc::now()),
        })
    }
}
