// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory page provider backed by fixture data.
//!
//! Serves the dashboard offline (for UI work) and stands in for the live
//! API in tests. Filters are evaluated locally and results are paginated
//! with numeric offset cursors, the same way the live API pages.

use crate::error::AppError;
use crate::models::Page;
use crate::services::provider::{PageProvider, QueryRequest, QueryResponse};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Page provider holding every database in memory.
#[derive(Default)]
pub struct InMemoryProvider {
    databases: HashMap<String, Vec<Page>>,
    /// Databases whose queries fail
    failing: HashSet<String>,
    queries: AtomicUsize,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load fixtures from a JSON file of the form `{ "<database_id>": [page, ...] }`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, FixtureError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| FixtureError::Io(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load fixtures from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self, FixtureError> {
        let databases: HashMap<String, Vec<Page>> =
            serde_json::from_str(json_data).map_err(|e| FixtureError::Parse(e.to_string()))?;

        tracing::info!(
            databases = databases.len(),
            pages = databases.values().map(Vec::len).sum::<usize>(),
            "Loaded page fixtures"
        );
        Ok(Self {
            databases,
            ..Self::default()
        })
    }

    /// Add pages to a database.
    pub fn with_pages(mut self, database_id: &str, pages: impl IntoIterator<Item = Page>) -> Self {
        self.databases
            .entry(database_id.to_string())
            .or_default()
            .extend(pages);
        self
    }

    /// Make every query against `database_id` fail.
    pub fn with_failure(mut self, database_id: &str) -> Self {
        self.failing.insert(database_id.to_string());
        self
    }

    /// Number of queries answered so far (including failed ones).
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageProvider for InMemoryProvider {
    async fn query(
        &self,
        database_id: &str,
        request: &QueryRequest,
    ) -> Result<QueryResponse, AppError> {
        self.queries.fetch_add(1, Ordering::SeqCst);

        if self.failing.contains(database_id) {
            tracing::warn!(database_id, "Fixture failure for database");
            return Err(AppError::provider_status(
                503,
                format!("HTTP 503 Service Unavailable: database {} unavailable", database_id),
            ));
        }

        let offset = match request.start_cursor.as_deref() {
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|_| {
                    AppError::provider_status(400, format!("HTTP 400 Bad Request: invalid start_cursor {}", cursor))
                })?,
            None => 0,
        };

        let matching: Vec<&Page> = self
            .databases
            .get(database_id)
            .map(|pages| {
                pages
                    .iter()
                    .filter(|page| request.filter.as_ref().map_or(true, |f| f.matches(page)))
                    .collect()
            })
            .unwrap_or_default();

        let page_size = request.page_size.max(1) as usize;
        let end = offset.saturating_add(page_size).min(matching.len());
        let results = matching
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .map(|page| (*page).clone())
            .collect();
        let has_more = end < matching.len();

        Ok(QueryResponse {
            results,
            has_more,
            next_cursor: has_more.then(|| end.to_string()),
        })
    }
}

/// Fixture loading errors
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to read fixture file: {0}")]
    Io(String),

    #[error("Failed to parse fixture JSON: {0}")]
    Parse(String),
}
