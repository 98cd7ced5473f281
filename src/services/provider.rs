// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Seam between the aggregation code and the pages database API.

use crate::error::AppError;
use crate::models::{Page, QueryFilter};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body of one database query request.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<QueryFilter>,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

/// One page of query results.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<Page>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Anything that can answer database queries.
#[async_trait]
pub trait PageProvider: Send + Sync {
    /// Fetch a single page of results for `database_id`.
    async fn query(
        &self,
        database_id: &str,
        request: &QueryRequest,
    ) -> Result<QueryResponse, AppError>;
}
