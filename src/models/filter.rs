// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Boolean filter tree for database queries.
//!
//! A [`QueryFilter`] serializes to the JSON the pages API expects and can
//! also be evaluated locally against a [`Page`] (used by the in-memory
//! provider).

use crate::models::page::Page;
use crate::time_utils::{day_end_timestamp, day_start_timestamp, format_date, local_date};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

/// A filter over the pages of one database.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryFilter {
    /// Every child must match
    And(Vec<QueryFilter>),
    /// Condition on a named property
    Property {
        property: String,
        condition: PropertyCondition,
    },
    /// Condition on the page creation timestamp
    CreatedTime(TimestampCondition),
}

/// Condition applied to a single property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyCondition {
    StatusEquals(String),
    SelectEquals(String),
    SelectIsNotEmpty,
    NumberIsNotEmpty,
    DateIsNotEmpty,
    DateOnOrAfter(NaiveDate),
    DateOnOrBefore(NaiveDate),
    FormulaDateOnOrAfter(NaiveDate),
    FormulaDateOnOrBefore(NaiveDate),
}

/// Inclusive creation-time window, expressed in UTC+9 calendar days.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampCondition {
    pub on_or_after: NaiveDate,
    pub on_or_before: Option<NaiveDate>,
}

impl QueryFilter {
    pub fn property(property: impl Into<String>, condition: PropertyCondition) -> Self {
        QueryFilter::Property {
            property: property.into(),
            condition,
        }
    }

    /// Conjunction of whichever filters are present.
    ///
    /// Returns `None` when nothing is left and the lone filter when only one
    /// is, so a single-element `and` is never sent.
    pub fn all(filters: impl IntoIterator<Item = Option<QueryFilter>>) -> Option<QueryFilter> {
        let mut filters: Vec<QueryFilter> = filters.into_iter().flatten().collect();
        match filters.len() {
            0 => None,
            1 => filters.pop(),
            _ => Some(QueryFilter::And(filters)),
        }
    }

    /// JSON body fragment in the pages API's filter format.
    pub fn to_json(&self) -> Value {
        match self {
            QueryFilter::And(children) => {
                json!({ "and": children.iter().map(QueryFilter::to_json).collect::<Vec<_>>() })
            }
            QueryFilter::Property {
                property,
                condition,
            } => {
                let (kind, body) = condition.to_json();
                let mut object = serde_json::Map::new();
                object.insert("property".to_string(), Value::String(property.clone()));
                object.insert(kind.to_string(), body);
                Value::Object(object)
            }
            QueryFilter::CreatedTime(window) => {
                let mut range = serde_json::Map::new();
                range.insert(
                    "on_or_after".to_string(),
                    Value::String(day_start_timestamp(window.on_or_after)),
                );
                if let Some(end) = window.on_or_before {
                    range.insert(
                        "on_or_before".to_string(),
                        Value::String(day_end_timestamp(end)),
                    );
                }
                json!({ "timestamp": "created_time", "created_time": range })
            }
        }
    }

    /// Evaluate the filter locally.
    pub fn matches(&self, page: &Page) -> bool {
        match self {
            QueryFilter::And(children) => children.iter().all(|child| child.matches(page)),
            QueryFilter::Property {
                property,
                condition,
            } => condition.matches(page, property),
            QueryFilter::CreatedTime(window) => {
                let created = local_date(page.created_time);
                created >= window.on_or_after
                    && window.on_or_before.map_or(true, |end| created <= end)
            }
        }
    }
}

impl PropertyCondition {
    /// Property type key and condition body.
    fn to_json(&self) -> (&'static str, Value) {
        match self {
            PropertyCondition::StatusEquals(value) => ("status", json!({ "equals": value })),
            PropertyCondition::SelectEquals(value) => ("select", json!({ "equals": value })),
            PropertyCondition::SelectIsNotEmpty => ("select", json!({ "is_not_empty": true })),
            PropertyCondition::NumberIsNotEmpty => ("number", json!({ "is_not_empty": true })),
            PropertyCondition::DateIsNotEmpty => ("date", json!({ "is_not_empty": true })),
            PropertyCondition::DateOnOrAfter(date) => {
                ("date", json!({ "on_or_after": format_date(*date) }))
            }
            PropertyCondition::DateOnOrBefore(date) => {
                ("date", json!({ "on_or_before": format_date(*date) }))
            }
            PropertyCondition::FormulaDateOnOrAfter(date) => (
                "formula",
                json!({ "date": { "on_or_after": format_date(*date) } }),
            ),
            PropertyCondition::FormulaDateOnOrBefore(date) => (
                "formula",
                json!({ "date": { "on_or_before": format_date(*date) } }),
            ),
        }
    }

    fn matches(&self, page: &Page, property: &str) -> bool {
        match self {
            PropertyCondition::StatusEquals(value) => page.status_name(property) == Some(value.as_str()),
            PropertyCondition::SelectEquals(value) => page.select_name(property) == Some(value.as_str()),
            PropertyCondition::SelectIsNotEmpty => page.select_name(property).is_some(),
            PropertyCondition::NumberIsNotEmpty => page.number(property).is_some(),
            PropertyCondition::DateIsNotEmpty => page.date(property).is_some(),
            PropertyCondition::DateOnOrAfter(date) => {
                page.date(property).is_some_and(|d| d >= *date)
            }
            PropertyCondition::DateOnOrBefore(date) => {
                page.date(property).is_some_and(|d| d <= *date)
            }
            PropertyCondition::FormulaDateOnOrAfter(date) => {
                page.formula_date(property).is_some_and(|d| d >= *date)
            }
            PropertyCondition::FormulaDateOnOrBefore(date) => {
                page.formula_date(property).is_some_and(|d| d <= *date)
            }
        }
    }
}

impl Serialize for QueryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
