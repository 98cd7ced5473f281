// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pages database API client.
//!
//! Handles:
//! - Database queries with filters and cursors
//! - Bearer auth and API version headers
//! - Non-2xx responses surfaced as query errors carrying the status

use crate::config::Config;
use crate::error::AppError;
use crate::services::provider::{PageProvider, QueryRequest, QueryResponse};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Pages database API client.
#[derive(Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_version: String,
}

impl NotionClient {
    /// Create a client from the configured credential, base URL and timeout.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.notion_api_url.trim_end_matches('/').to_string(),
            api_key: config.notion_api_key.clone(),
            api_version: config.notion_version.clone(),
        })
    }

    fn query_url(&self, database_id: &str) -> String {
        format!("{}/databases/{}/query", self.base_url, database_id)
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::provider_status(
                status.as_u16(),
                format!("HTTP {}: {}", status, body),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::provider(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl PageProvider for NotionClient {
    async fn query(
        &self,
        database_id: &str,
        request: &QueryRequest,
    ) -> Result<QueryResponse, AppError> {
        let response = self
            .http
            .post(self.query_url(database_id))
            .bearer_auth(&self.api_key)
            .header("Notion-Version", &self.api_version)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::provider(e.to_string()))?;

        self.check_response_json(response).await
    }
}
