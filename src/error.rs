// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// `status` is the HTTP status when the provider answered at all
    #[error("Pages API error: {message}")]
    ProviderQuery {
        status: Option<u16>,
        message: String,
    },

    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Value of the `error` field for every failed points request.
    pub const FETCH_FAILED: &'static str = "Failed to fetch points";

    /// Provider failure without an HTTP status (transport or decode error).
    pub fn provider(message: impl Into<String>) -> Self {
        AppError::ProviderQuery {
            status: None,
            message: message.into(),
        }
    }

    /// Provider answered with a non-success HTTP status.
    pub fn provider_status(status: u16, message: impl Into<String>) -> Self {
        AppError::ProviderQuery {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Whether the provider rejected the call for rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            AppError::ProviderQuery {
                status: Some(429),
                ..
            }
        )
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::ProviderQuery { status, message } => {
                tracing::error!(status = ?status, error = %message, "Pages API query failed");
            }
            AppError::InvalidDateFormat(input) => {
                tracing::error!(input = %input, "Calendar function received a malformed date");
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
            }
        }

        let body = ErrorResponse {
            error: Self::FETCH_FAILED.to_string(),
            message: self.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
