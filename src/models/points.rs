// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregated point results.
//!
//! Everything here is derived per request and never stored.

use chrono::NaiveDate;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Inclusive range of calendar dates. An absent `end` is unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Single calendar day.
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, Some(date))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && self.end.map_or(true, |end| date <= end)
    }
}

/// Points contributed by one source over a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SourceResult {
    pub id: String,
    pub label: String,
    pub emoji: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub points: u64,
    /// Records that matched and fell inside the window
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub count: u64,
}

/// Total and per-source breakdown for one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodResult {
    pub total_points: u64,
    pub breakdown: Vec<SourceResult>,
    /// At least one source hit the fetch cap, so totals may be low
    pub truncated: bool,
}

impl PeriodResult {
    pub fn from_breakdown(breakdown: Vec<SourceResult>, truncated: bool) -> Self {
        let total_points = breakdown.iter().map(|s| s.points).sum();
        Self {
            total_points,
            breakdown,
            truncated,
        }
    }
}

/// Points earned on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyHistoryEntry {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub points: u64,
}
