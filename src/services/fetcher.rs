// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Paginated record fetching.

use crate::error::AppError;
use crate::models::{Page, QueryFilter};
use crate::services::provider::{PageProvider, QueryRequest};

/// Largest page the API will return.
pub const PAGE_SIZE: u32 = 100;

/// Stop paging once more than this many records have accumulated.
pub const MAX_RECORDS: usize = 5000;

/// Records from one query, plus whether paging stopped early.
#[derive(Debug, Default)]
pub struct FetchedPages {
    pub pages: Vec<Page>,
    /// More records remained when the cap was hit
    pub truncated: bool,
}

/// Fetch every record in `database_id` matching both filters.
///
/// The date-range and content filters are combined into one conjunctive
/// query. Pages are requested until the provider reports no more, or until
/// more than [`MAX_RECORDS`] have been collected. Provider errors are
/// returned as-is, without retry.
pub async fn fetch_pages(
    provider: &dyn PageProvider,
    database_id: &str,
    date_range: Option<QueryFilter>,
    extra: Option<&QueryFilter>,
) -> Result<FetchedPages, AppError> {
    let mut request = QueryRequest {
        filter: QueryFilter::all([date_range, extra.cloned()]),
        page_size: PAGE_SIZE,
        start_cursor: None,
    };
    let mut fetched = FetchedPages::default();

    loop {
        let response = match provider.query(database_id, &request).await {
            Ok(response) => response,
            Err(err) => {
                if err.is_rate_limited() {
                    tracing::warn!(database_id, "Pages API rate limit hit (429)");
                }
                return Err(err);
            }
        };
        fetched.pages.extend(response.results);

        if !response.has_more {
            break;
        }
        if fetched.pages.len() > MAX_RECORDS {
            tracing::warn!(
                database_id,
                records = fetched.pages.len(),
                "Record cap reached, remaining pages skipped"
            );
            fetched.truncated = true;
            break;
        }
        match response.next_cursor {
            Some(cursor) => request.start_cursor = Some(cursor),
            None => {
                tracing::warn!(database_id, "Provider reported more pages without a cursor");
                break;
            }
        }
    }

    tracing::debug!(database_id, records = fetched.pages.len(), "Fetched records");
    Ok(fetched)
}
