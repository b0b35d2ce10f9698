// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, Json};
use tracing::{debug, info, warn};

use super::request::PredictRequest;
use super::response::PredictResponse;
use crate::api::http_server::AppState;
use crate::api::ApiError;

/// POST /predict - Classify an iris from its four measurements
///
/// # Errors
/// - 400 Bad Request: a measurement is non-finite or outside `[0, 100]`
/// - 422 Unprocessable Entity: malformed JSON or a missing field
/// - 500 Internal Server Error: the model failed
pub async fn predict_handler(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    debug!("Predict request received: {:?}", request);

    let features = request.validate().map_err(|e| {
        warn!("Predict validation failed: {}", e);
        e
    })?;

    let class_id = state.tabular.predict(features).await.map_err(|e| {
        warn!("Iris prediction failed: {:#}", e);
        ApiError::InferenceFailure(e.to_string())
    })?;

    let response = PredictResponse::new(class_id);
    info!(
        "Predict complete: class {} ({})",
        response.prediction,
        response.species.as_deref().unwrap_or("unknown")
    );

    Ok(Json(response))
}
