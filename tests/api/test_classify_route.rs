// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /classify/ through the real router

use super::common::{body_json, corpus, json_request, send, state_with, test_router, BrokenSentiment};
use axum::http::StatusCode;
use model_gateway::{api::create_router, vision::MAX_IMAGE_SIZE};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_classify_returns_index_and_label() {
    let response = send(
        test_router().await,
        json_request("/classify/", json!({"text": "I love this movie"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"result": 1, "label": "POSITIVE"})
    );
}

#[tokio::test]
async fn test_classify_is_stable_across_calls() {
    let router = test_router().await;
    for _ in 0..3 {
        let response = send(
            router.clone(),
            json_request("/classify/", json!({"text": "I love this movie"})),
        )
        .await;
        assert_eq!(body_json(response).await["result"], 1);
    }
}

#[tokio::test]
async fn test_empty_text_is_accepted() {
    let response = send(
        test_router().await,
        json_request("/classify/", json!({"text": ""})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["result"], 0);
}

#[tokio::test]
async fn test_inference_failure_is_500() {
    let state = state_with(Arc::new(BrokenSentiment), corpus()).await;
    let response = send(
        create_router(state, MAX_IMAGE_SIZE),
        json_request("/classify/", json!({"text": "anything"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error_type"], "inference_failure");
}
