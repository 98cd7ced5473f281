// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Point aggregation over date windows.
//!
//! Each call queries the provider afresh; nothing is cached between calls
//! or requests.

use crate::error::AppError;
use crate::models::{
    DailyHistoryEntry, DateWindow, Page, PeriodResult, PointSource, SourceRegistry, SourceResult,
};
use crate::services::fetcher::{fetch_pages, FetchedPages};
use crate::services::provider::PageProvider;
use crate::time_utils::{add_days, checked_add_days};
use chrono::NaiveDate;
use futures_util::future::try_join_all;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Longest daily history that can be requested.
pub const MAX_HISTORY_DAYS: u32 = 366;

/// Sum points and matching records for one source.
///
/// Only records whose resolved date falls inside `window` count; records
/// without a resolvable date are skipped.
pub fn tally(source: &PointSource, pages: &[Page], window: &DateWindow) -> SourceResult {
    let mut points = 0u64;
    let mut count = 0u64;
    let mut unresolved = 0usize;

    for page in pages {
        match source.date_rule.resolve(page) {
            Some(date) if window.contains(date) => {
                points += source.points.points_for(page);
                count += 1;
            }
            Some(_) => {}
            None => unresolved += 1,
        }
    }

    if unresolved > 0 {
        tracing::debug!(source = %source.id, unresolved, "Skipped records without a resolvable date");
    }

    SourceResult {
        id: source.id.clone(),
        label: source.label.clone(),
        emoji: source.emoji.clone(),
        points,
        count,
    }
}

/// Computes point totals from the configured sources.
#[derive(Clone)]
pub struct PointsService {
    provider: Arc<dyn PageProvider>,
    registry: Arc<SourceRegistry>,
}

impl PointsService {
    pub fn new(provider: Arc<dyn PageProvider>, registry: Arc<SourceRegistry>) -> Self {
        Self { provider, registry }
    }

    /// Fetch one source's records for `window`.
    async fn fetch_source(
        &self,
        source: &PointSource,
        window: &DateWindow,
    ) -> Result<FetchedPages, AppError> {
        fetch_pages(
            self.provider.as_ref(),
            &source.database_id,
            Some(source.date_rule.range_filter(window)),
            source.filter.as_ref(),
        )
        .await
    }

    /// Points per source and in total for `window`.
    ///
    /// Sources are grouped by backing database. Sources sharing a database
    /// carry different content filters, so each still gets its own query.
    /// Every source appears in the breakdown, even with no records.
    pub async fn calculate_points(&self, window: DateWindow) -> Result<PeriodResult, AppError> {
        let groups = self.registry.by_database();

        let mut queries = Vec::with_capacity(self.registry.sources().len());
        for (database_id, sources) in &groups {
            if sources.len() > 1 {
                tracing::debug!(
                    database_id,
                    sources = sources.len(),
                    "Shared database, querying per source"
                );
            }
            for source in sources {
                let source: &PointSource = source;
                queries.push(async move {
                    let fetched = self.fetch_source(source, &window).await?;
                    Ok::<_, AppError>((tally(source, &fetched.pages, &window), fetched.truncated))
                });
            }
        }

        let results = try_join_all(queries).await?;
        let truncated = results.iter().any(|(_, truncated)| *truncated);
        let breakdown = results.into_iter().map(|(result, _)| result).collect();
        let period = PeriodResult::from_breakdown(breakdown, truncated);

        tracing::debug!(
            start = %window.start,
            end = ?window.end,
            points = period.total_points,
            truncated,
            "Calculated period points"
        );
        Ok(period)
    }

    /// Points per day for the `days` days ending on `end` (inclusive).
    ///
    /// Always returns exactly `days` entries in ascending date order, with
    /// zeros for days nothing was recorded. More than [`MAX_HISTORY_DAYS`]
    /// days, or a range reaching past the representable calendar, is an
    /// error.
    pub async fn daily_history(
        &self,
        end: NaiveDate,
        days: u32,
    ) -> Result<Vec<DailyHistoryEntry>, AppError> {
        if days == 0 {
            return Ok(Vec::new());
        }
        if days > MAX_HISTORY_DAYS {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Daily history of {} days exceeds the {} day limit",
                days,
                MAX_HISTORY_DAYS
            )));
        }

        let start = checked_add_days(end, -(i64::from(days) - 1)).ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "Daily history of {} days before {} is out of range",
                days,
                end
            ))
        })?;
        let window = DateWindow::new(start, Some(end));

        let mut daily: BTreeMap<NaiveDate, u64> = (0..i64::from(days))
            .map(|offset| (add_days(start, offset), 0))
            .collect();

        let fetched = try_join_all(
            self.registry
                .sources()
                .iter()
                .map(|source| self.fetch_source(source, &window)),
        )
        .await?;

        for (source, fetched) in self.registry.sources().iter().zip(&fetched) {
            for page in &fetched.pages {
                let Some(date) = source.date_rule.resolve(page) else {
                    continue;
                };
                if let Some(bucket) = daily.get_mut(&date) {
                    *bucket += source.points.points_for(page);
                }
            }
        }

        Ok(daily
            .into_iter()
            .map(|(date, points)| DailyHistoryEntry { date, points })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRule, PointsRule, PropertyValue};
    use crate::time_utils::parse_date;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn dated(id: &str, date: &str) -> Page {
        Page::new(id, "2024-01-01T00:00:00Z".parse().unwrap())
            .with_property("Date", PropertyValue::date(date))
    }

    fn source(points: u64) -> PointSource {
        PointSource {
            id: "reading".to_string(),
            label: "Reading".to_string(),
            emoji: "📚".to_string(),
            database_id: "db".to_string(),
            date_rule: DateRule::Property("Date".to_string()),
            filter: None,
            points: PointsRule::Fixed(points),
        }
    }

    #[test]
    fn test_tally_fixed_points() {
        let pages: Vec<Page> = (1..=4).map(|i| dated(&format!("p{i}"), "2024-05-02")).collect();
        let window = DateWindow::day(d("2024-05-02"));

        let result = tally(&source(3), &pages, &window);
        assert_eq!(result.points, 12);
        assert_eq!(result.count, 4);
    }

    #[test]
    fn test_tally_boundary_and_unresolved_dates() {
        let pages = vec![
            dated("start", "2024-05-01"),
            dated("end", "2024-05-07T23:59:00+09:00"),
            dated("after", "2024-05-08"),
            dated("before", "2024-04-30"),
            Page::new("undated", "2024-05-03T00:00:00Z".parse().unwrap()),
        ];
        let window = DateWindow::new(d("2024-05-01"), Some(d("2024-05-07")));

        let result = tally(&source(1), &pages, &window);
        assert_eq!(result.count, 2);
        assert_eq!(result.points, 2);
    }

    #[tokio::test]
    async fn test_daily_history_zero_fills() {
        let provider = crate::services::fixture::InMemoryProvider::new()
            .with_pages("db", vec![dated("a", "2024-05-10"), dated("b", "2024-05-10")]);
        let registry = SourceRegistry::new(vec![source(2)]).unwrap();
        let service = PointsService::new(Arc::new(provider), Arc::new(registry));

        let history = service.daily_history(d("2024-05-10"), 5).await.unwrap();
        let dates: Vec<String> = history.iter().map(|e| e.date.to_string()).collect();
        assert_eq!(
            dates,
            ["2024-05-06", "2024-05-07", "2024-05-08", "2024-05-09", "2024-05-10"]
        );
        let points: Vec<u64> = history.iter().map(|e| e.points).collect();
        assert_eq!(points, [0, 0, 0, 0, 4]);
    }

    #[tokio::test]
    async fn test_daily_history_rejects_oversized_ranges() {
        let provider = crate::services::fixture::InMemoryProvider::new();
        let service = PointsService::new(Arc::new(provider), Arc::new(SourceRegistry::builtin()));

        let err = service.daily_history(d("2024-05-10"), 200_000_000).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert!(service
            .daily_history(d("2024-05-10"), MAX_HISTORY_DAYS + 1)
            .await
            .is_err());

        // Within the limit, but before the earliest representable date
        let err = service.daily_history(NaiveDate::MIN, 2).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));

        let history = service.daily_history(d("2024-05-10"), MAX_HISTORY_DAYS).await.unwrap();
        assert_eq!(history.len(), MAX_HISTORY_DAYS as usize);
        assert_eq!(history[0].date, d("2023-05-11"));
    }

    #[tokio::test]
    async fn test_daily_history_of_zero_days_is_empty() {
        let provider = crate::services::fixture::InMemoryProvider::new();
        let service = PointsService::new(Arc::new(provider), Arc::new(SourceRegistry::builtin()));
        assert!(service.daily_history(d("2024-05-10"), 0).await.unwrap().is_empty());
    }
}
