// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use life_points::error::AppError;
use life_points::time_utils::parse_date;

#[test]
fn test_is_rate_limited_matches() {
    let err = AppError::provider_status(429, "HTTP 429 Too Many Requests: slow down");
    assert!(err.is_rate_limited());

    // Detection follows the status, not the wording
    let err = AppError::provider_status(429, "rate_limited");
    assert!(err.is_rate_limited());
}

#[test]
fn test_is_rate_limited_no_match() {
    let err = AppError::provider_status(401, "HTTP 401 Unauthorized: bad token");
    assert!(!err.is_rate_limited());

    let err = AppError::provider("HTTP 429 mentioned in a transport error");
    assert!(!err.is_rate_limited());

    let err = AppError::InvalidDateFormat("2024-13-01".to_string());
    assert!(!err.is_rate_limited());
}

#[tokio::test]
async fn test_every_error_is_a_500_with_message() {
    let errors = [
        AppError::provider_status(400, "HTTP 400 Bad Request: malformed filter"),
        parse_date("05/01/2024").unwrap_err(),
        AppError::Internal(anyhow::anyhow!("boom")),
    ];

    for err in errors {
        let expected_message = err.to_string();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Failed to fetch points");
        assert_eq!(json["message"], expected_message);
    }
}
