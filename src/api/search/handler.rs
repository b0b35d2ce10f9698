// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search endpoint handler

use axum::{
    extract::{Query, State},
    Json,
};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::request::SearchQuery;
use super::response::SearchResponse;
use crate::api::http_server::AppState;
use crate::api::ApiError;

/// POST /search/ - Nearest corpus titles for a query
///
/// # Request
/// - `query`: query-string parameter (required, non-blank)
///
/// # Response
/// - `query`: the query as received
/// - `results`: up to `top_k` titles with cosine similarity, best first
///
/// # Errors
/// - 400 Bad Request: blank or missing query
/// - 500 Internal Server Error: embedding or index lookup failed
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    debug!("Search request received: '{}'", params.query);

    if let Err(e) = params.validate() {
        warn!("Search validation failed: {}", e);
        return Err(e);
    }

    let start = Instant::now();
    let results = state.search.search(&params.query).await.map_err(|e| {
        warn!("Search failed: {}", e);
        ApiError::from(e)
    })?;

    info!(
        "Search complete: {} results in {}ms",
        results.len(),
        start.elapsed().as_millis()
    );

    Ok(Json(SearchResponse {
        query: params.query,
        results,
    }))
}
