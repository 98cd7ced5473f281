// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Point sources: where records come from and what each one is worth.
//!
//! Every source picks exactly one [`DateRule`] and one [`PointsRule`]
//! statically, so how a record is dated and scored never depends on what
//! the record happens to contain.

use crate::models::filter::{PropertyCondition, QueryFilter, TimestampCondition};
use crate::models::page::Page;
use crate::models::points::DateWindow;
use crate::time_utils::local_date;
use chrono::NaiveDate;
use std::collections::HashSet;

/// How a record's calendar date is determined.
#[derive(Debug, Clone, PartialEq)]
pub enum DateRule {
    /// A `date` property
    Property(String),
    /// A `formula` property producing a date (or a string starting with one)
    Formula(String),
    /// The page's creation time, in UTC+9
    CreatedTime,
}

impl DateRule {
    /// Resolve the record's date, or `None` if it cannot be determined.
    /// Unresolved records are excluded from every total.
    pub fn resolve(&self, page: &Page) -> Option<NaiveDate> {
        match self {
            DateRule::Property(name) => page.date(name),
            DateRule::Formula(name) => page.formula_date(name),
            DateRule::CreatedTime => Some(local_date(page.created_time)),
        }
    }

    /// Provider-side filter restricting records to `window`.
    pub fn range_filter(&self, window: &DateWindow) -> QueryFilter {
        match self {
            DateRule::CreatedTime => QueryFilter::CreatedTime(TimestampCondition {
                on_or_after: window.start,
                on_or_before: window.end,
            }),
            DateRule::Property(name) => bounded(
                QueryFilter::property(name.clone(), PropertyCondition::DateOnOrAfter(window.start)),
                window
                    .end
                    .map(|end| QueryFilter::property(name.clone(), PropertyCondition::DateOnOrBefore(end))),
            ),
            DateRule::Formula(name) => bounded(
                QueryFilter::property(
                    name.clone(),
                    PropertyCondition::FormulaDateOnOrAfter(window.start),
                ),
                window.end.map(|end| {
                    QueryFilter::property(name.clone(), PropertyCondition::FormulaDateOnOrBefore(end))
                }),
            ),
        }
    }
}

fn bounded(lower: QueryFilter, upper: Option<QueryFilter>) -> QueryFilter {
    match upper {
        Some(upper) => QueryFilter::And(vec![lower, upper]),
        None => lower,
    }
}

/// Scoring functions that read record content.
#[derive(Debug, Clone, PartialEq)]
pub enum ComputedPoints {
    /// Score by the prefix of a select option's name; first matching prefix wins.
    SelectGrade {
        property: String,
        grades: Vec<(String, u64)>,
    },
    /// One point per whole `unit` of a number property.
    NumberPerUnit { property: String, unit: f64 },
}

/// How many points a single record is worth.
#[derive(Debug, Clone, PartialEq)]
pub enum PointsRule {
    Fixed(u64),
    Computed(ComputedPoints),
}

impl PointsRule {
    /// Points for one record. Missing or unusable content scores 0.
    pub fn points_for(&self, page: &Page) -> u64 {
        match self {
            PointsRule::Fixed(points) => *points,
            PointsRule::Computed(ComputedPoints::SelectGrade { property, grades }) => {
                let Some(name) = page.select_name(property) else {
                    return 0;
                };
                grades
                    .iter()
                    .find(|(prefix, _)| name.starts_with(prefix.as_str()))
                    .map_or(0, |(_, points)| *points)
            }
            PointsRule::Computed(ComputedPoints::NumberPerUnit { property, unit }) => {
                match page.number(property) {
                    Some(value) if value.is_finite() && value > 0.0 && *unit > 0.0 => {
                        (value / unit).floor() as u64
                    }
                    _ => 0,
                }
            }
        }
    }
}

/// One configured category of activity tracked for points.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSource {
    /// Unique key, also the `id` in the API breakdown
    pub id: String,
    pub label: String,
    pub emoji: String,
    /// Backing database; several sources may share one
    pub database_id: String,
    pub date_rule: DateRule,
    /// Source-specific content filter; `None` counts every record
    pub filter: Option<QueryFilter>,
    pub points: PointsRule,
}

impl PointSource {
    /// Combined date-range and content filter for one query.
    pub fn query_filter(&self, window: &DateWindow) -> Option<QueryFilter> {
        QueryFilter::all([Some(self.date_rule.range_filter(window)), self.filter.clone()])
    }
}

/// Errors in the static source and level configuration.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Duplicate point source id: {0}")]
    DuplicateSourceId(String),

    #[error("Level ladder is empty")]
    EmptyLadder,

    #[error("Level {0} threshold does not increase over the previous tier")]
    NonMonotonicLadder(u32),
}

/// The fixed list of point sources, in display order.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<PointSource>,
}

impl SourceRegistry {
    /// Build a registry, rejecting duplicate ids.
    pub fn new(sources: Vec<PointSource>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for source in &sources {
            if !seen.insert(source.id.as_str()) {
                return Err(RegistryError::DuplicateSourceId(source.id.clone()));
            }
        }
        Ok(Self { sources })
    }

    pub fn sources(&self) -> &[PointSource] {
        &self.sources
    }

    pub fn get(&self, id: &str) -> Option<&PointSource> {
        self.sources.iter().find(|s| s.id == id)
    }

    /// Sources grouped by backing database, databases in order of first
    /// appearance and sources in registry order within each group.
    pub fn by_database(&self) -> Vec<(&str, Vec<&PointSource>)> {
        let mut groups: Vec<(&str, Vec<&PointSource>)> = Vec::new();
        for source in &self.sources {
            match groups
                .iter()
                .position(|(database_id, _)| *database_id == source.database_id)
            {
                Some(index) => groups[index].1.push(source),
                None => groups.push((source.database_id.as_str(), vec![source])),
            }
        }
        groups
    }

    /// The sources the dashboard ships with.
    pub fn builtin() -> Self {
        Self {
            sources: builtin_sources(),
        }
    }
}

const TASKS_DB: &str = "2fb2f3b8-e9a2-8029-ad0b-c5968306d326";
const BOOKS_DB: &str = "7d7964ba-9502-4234-9a7f-496b35adb3c3";
const CINEMA_DB: &str = "7df76879-14fc-427a-9f7c-9353e13629c1";
const INSIGHTS_DB: &str = "3022f3b8-e9a2-800c-892a-cda4a4d90460";
const HEALTH_DB: &str = "3012f3b8-e9a2-80fc-9ced-f7c3e720fd21";

fn builtin_sources() -> Vec<PointSource> {
    vec![
        PointSource {
            id: "tasks".to_string(),
            label: "タスク完了".to_string(),
            emoji: "✅".to_string(),
            database_id: TASKS_DB.to_string(),
            date_rule: DateRule::Property("Start".to_string()),
            filter: Some(QueryFilter::property(
                "State",
                PropertyCondition::StatusEquals("Done".to_string()),
            )),
            points: PointsRule::Fixed(1),
        },
        PointSource {
            id: "books".to_string(),
            label: "読書".to_string(),
            emoji: "📚".to_string(),
            database_id: BOOKS_DB.to_string(),
            date_rule: DateRule::Property("読了日".to_string()),
            filter: Some(QueryFilter::property("読了日", PropertyCondition::DateIsNotEmpty)),
            points: PointsRule::Fixed(3),
        },
        PointSource {
            id: "cinema".to_string(),
            label: "映画鑑賞".to_string(),
            emoji: "🎬".to_string(),
            database_id: CINEMA_DB.to_string(),
            date_rule: DateRule::Property("y/m/d".to_string()),
            filter: Some(QueryFilter::property("y/m/d", PropertyCondition::DateIsNotEmpty)),
            points: PointsRule::Fixed(3),
        },
        PointSource {
            id: "insights".to_string(),
            label: "インサイト".to_string(),
            emoji: "💡".to_string(),
            database_id: INSIGHTS_DB.to_string(),
            date_rule: DateRule::CreatedTime,
            filter: None,
            points: PointsRule::Fixed(2),
        },
        PointSource {
            id: "health_light".to_string(),
            label: "朝の光".to_string(),
            emoji: "☀️".to_string(),
            database_id: HEALTH_DB.to_string(),
            date_rule: DateRule::Property("Date".to_string()),
            filter: Some(QueryFilter::property("光", PropertyCondition::SelectIsNotEmpty)),
            points: PointsRule::Computed(ComputedPoints::SelectGrade {
                property: "光".to_string(),
                grades: vec![
                    ("A".to_string(), 5),
                    ("B".to_string(), 3),
                    ("C".to_string(), 1),
                ],
            }),
        },
        PointSource {
            id: "health_steps".to_string(),
            label: "ウォーキング".to_string(),
            emoji: "🚶".to_string(),
            database_id: HEALTH_DB.to_string(),
            date_rule: DateRule::Property("Date".to_string()),
            filter: Some(QueryFilter::property("歩数", PropertyCondition::NumberIsNotEmpty)),
            points: PointsRule::Computed(ComputedPoints::NumberPerUnit {
                property: "歩数".to_string(),
                unit: 1000.0,
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::page::PropertyValue;
    use crate::time_utils::parse_date;
    use serde_json::json;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn page() -> Page {
        Page::new("p", "2024-05-01T20:00:00Z".parse().unwrap())
    }

    #[test]
    fn test_builtin_registry_ids_are_unique() {
        let registry = SourceRegistry::builtin();
        let rebuilt = SourceRegistry::new(registry.sources().to_vec()).unwrap();
        assert_eq!(rebuilt.sources().len(), 6);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut sources = builtin_sources();
        sources.push(sources[0].clone());
        let err = SourceRegistry::new(sources).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateSourceId(id) if id == "tasks"));
    }

    #[test]
    fn test_by_database_groups_shared_databases() {
        let registry = SourceRegistry::builtin();
        let groups = registry.by_database();

        assert_eq!(groups.len(), 5);
        let (health_db, health_sources) = &groups[4];
        assert_eq!(*health_db, HEALTH_DB);
        let ids: Vec<&str> = health_sources.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["health_light", "health_steps"]);
    }

    #[test]
    fn test_date_rules_resolve_exactly_one_field() {
        let page = page()
            .with_property("Start", PropertyValue::date("2024-04-30T23:00:00+09:00"))
            .with_property("Due", PropertyValue::date("2024-06-01"));

        assert_eq!(DateRule::Property("Start".into()).resolve(&page), Some(d("2024-04-30")));
        // Created 20:00 UTC May 1st, which is May 2nd in UTC+9
        assert_eq!(DateRule::CreatedTime.resolve(&page), Some(d("2024-05-02")));
        // A date property never satisfies a formula rule
        assert_eq!(DateRule::Formula("Due".into()).resolve(&page), None);
        assert_eq!(DateRule::Property("Missing".into()).resolve(&page), None);
    }

    #[test]
    fn test_range_filter_shapes() {
        let window = DateWindow::new(d("2024-05-01"), Some(d("2024-05-07")));
        let tasks = SourceRegistry::builtin().get("tasks").cloned().unwrap();

        assert_eq!(
            tasks.query_filter(&window).unwrap().to_json(),
            json!({
                "and": [
                    { "and": [
                        { "property": "Start", "date": { "on_or_after": "2024-05-01" } },
                        { "property": "Start", "date": { "on_or_before": "2024-05-07" } }
                    ] },
                    { "property": "State", "status": { "equals": "Done" } }
                ]
            })
        );

        let insights = SourceRegistry::builtin().get("insights").cloned().unwrap();
        assert_eq!(
            insights.query_filter(&window).unwrap().to_json(),
            json!({
                "timestamp": "created_time",
                "created_time": {
                    "on_or_after": "2024-05-01T00:00:00+09:00",
                    "on_or_before": "2024-05-07T23:59:59+09:00"
                }
            })
        );

        let open_ended = DateWindow::new(d("2021-01-01"), None);
        let formula = DateRule::Formula("Due".into()).range_filter(&open_ended);
        assert_eq!(
            formula.to_json(),
            json!({ "property": "Due", "formula": { "date": { "on_or_after": "2021-01-01" } } })
        );

        let bounded = DateRule::Formula("Due".into()).range_filter(&window);
        assert_eq!(
            bounded.to_json(),
            json!({
                "and": [
                    { "property": "Due", "formula": { "date": { "on_or_after": "2024-05-01" } } },
                    { "property": "Due", "formula": { "date": { "on_or_before": "2024-05-07" } } }
                ]
            })
        );

        let inside = page().with_property("Due", PropertyValue::formula_text("2024-05-07 (Tue)"));
        let after = page().with_property("Due", PropertyValue::formula_text("2024-05-08"));
        assert!(bounded.matches(&inside));
        assert!(!bounded.matches(&after));
    }

    #[test]
    fn test_select_grade_points() {
        let rule = SourceRegistry::builtin().get("health_light").unwrap().points.clone();

        assert_eq!(rule.points_for(&page().with_property("光", PropertyValue::select("A: 30分以上"))), 5);
        assert_eq!(rule.points_for(&page().with_property("光", PropertyValue::select("B"))), 3);
        assert_eq!(rule.points_for(&page().with_property("光", PropertyValue::select("C 少し"))), 1);
        assert_eq!(rule.points_for(&page().with_property("光", PropertyValue::select("なし"))), 0);
        assert_eq!(rule.points_for(&page()), 0);
    }

    #[test]
    fn test_number_per_unit_points() {
        let rule = SourceRegistry::builtin().get("health_steps").unwrap().points.clone();

        assert_eq!(rule.points_for(&page().with_property("歩数", PropertyValue::number(8421.0))), 8);
        assert_eq!(rule.points_for(&page().with_property("歩数", PropertyValue::number(999.0))), 0);
        assert_eq!(rule.points_for(&page().with_property("歩数", PropertyValue::number(-5000.0))), 0);
        assert_eq!(rule.points_for(&page().with_property("歩数", PropertyValue::number(f64::NAN))), 0);
        assert_eq!(rule.points_for(&page()), 0);
    }

    #[test]
    fn test_fixed_points_ignore_content() {
        assert_eq!(PointsRule::Fixed(3).points_for(&page()), 3);
    }
}
