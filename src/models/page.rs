// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pages returned by the pages database API.
//!
//! Only the property types the point sources read are modelled; anything
//! else deserializes to [`PropertyValue::Other`] and is ignored.

use crate::time_utils::parse_date;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashMap;

/// A single record ("page") in a backing database.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    pub id: String,
    /// When the page was created (UTC)
    pub created_time: DateTime<Utc>,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

/// A typed property value, tagged by the API's `type` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Date {
        date: Option<DateValue>,
    },
    Formula {
        formula: FormulaValue,
    },
    Select {
        select: Option<SelectOption>,
    },
    Status {
        status: Option<SelectOption>,
    },
    Number {
        number: Option<f64>,
    },
    #[serde(other)]
    Other,
}

/// Result of a formula property, tagged by its own `type` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaValue {
    Date {
        date: Option<DateValue>,
    },
    #[serde(rename = "string")]
    Text {
        string: Option<String>,
    },
    Number {
        number: Option<f64>,
    },
    Boolean {
        boolean: Option<bool>,
    },
    #[serde(other)]
    Other,
}

/// Date or date range. `start` may carry a time component.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DateValue {
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl DateValue {
    /// Calendar date of `start`, ignoring any time component.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start.as_deref().and_then(date_prefix)
    }
}

/// Option of a select or status property.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

/// Parse the leading `YYYY-MM-DD` of a date or datetime string.
pub fn date_prefix(value: &str) -> Option<NaiveDate> {
    value.get(..10).and_then(|prefix| parse_date(prefix).ok())
}

impl Page {
    pub fn new(id: impl Into<String>, created_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_time,
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Name of the selected option, if the property is a non-empty select.
    pub fn select_name(&self, name: &str) -> Option<&str> {
        match self.property(name)? {
            PropertyValue::Select { select: Some(option) } => Some(&option.name),
            _ => None,
        }
    }

    /// Name of the current status, if the property is a non-empty status.
    pub fn status_name(&self, name: &str) -> Option<&str> {
        match self.property(name)? {
            PropertyValue::Status { status: Some(option) } => Some(&option.name),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.property(name)? {
            PropertyValue::Number { number } => *number,
            _ => None,
        }
    }

    /// Start date of a `date` property.
    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        match self.property(name)? {
            PropertyValue::Date { date: Some(value) } => value.start_date(),
            _ => None,
        }
    }

    /// Date produced by a formula property, whether it returns a date or a
    /// string beginning with one.
    pub fn formula_date(&self, name: &str) -> Option<NaiveDate> {
        match self.property(name)? {
            PropertyValue::Formula { formula } => match formula {
                FormulaValue::Date { date: Some(value) } => value.start_date(),
                FormulaValue::Text { string: Some(text) } => date_prefix(text),
                _ => None,
            },
            _ => None,
        }
    }
}

impl PropertyValue {
    pub fn date(start: &str) -> Self {
        PropertyValue::Date {
            date: Some(DateValue {
                start: Some(start.to_string()),
                end: None,
            }),
        }
    }

    pub fn select(name: &str) -> Self {
        PropertyValue::Select {
            select: Some(SelectOption {
                name: name.to_string(),
            }),
        }
    }

    pub fn status(name: &str) -> Self {
        PropertyValue::Status {
            status: Some(SelectOption {
                name: name.to_string(),
            }),
        }
    }

    pub fn number(value: f64) -> Self {
        PropertyValue::Number {
            number: Some(value),
        }
    }

    /// Formula property whose result is a string.
    pub fn formula_text(text: &str) -> Self {
        PropertyValue::Formula {
            formula: FormulaValue::Text {
                string: Some(text.to_string()),
            },
        }
    }
}
