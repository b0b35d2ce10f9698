// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, Json};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::request::ClassifyRequest;
use super::response::ClassifyResponse;
use crate::api::http_server::AppState;
use crate::api::ApiError;

/// POST /classify/ - Sentiment of a piece of text
///
/// Returns the arg-max class index of the classifier's logits.
pub async fn classify_handler(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    debug!("Classify request received: {} chars", request.text.len());
    let start = Instant::now();

    let classification = state
        .text_classifier
        .classify(&request.text)
        .await
        .map_err(|e| {
            warn!("Text classification failed: {:#}", e);
            ApiError::InferenceFailure(e.to_string())
        })?;

    info!(
        "Classify complete: class {} ({:?}) in {}ms",
        classification.class_id,
        classification.label,
        start.elapsed().as_millis()
    );

    Ok(Json(classification.into()))
}
