// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /predict through the real router

use super::common::{body_json, json_request, send, test_router};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;

fn setosa() -> serde_json::Value {
    json!({"sepal_length": 5.1, "sepal_width": 3.5, "petal_length": 1.4, "petal_width": 0.2})
}

#[tokio::test]
async fn test_predict_returns_label_and_species() {
    let response = send(test_router().await, json_request("/predict", setosa())).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"prediction": 0, "species": "setosa"})
    );
}

#[tokio::test]
async fn test_predict_is_stable_across_calls() {
    let router = test_router().await;
    let mut seen = Vec::new();
    for _ in 0..3 {
        let response = send(router.clone(), json_request("/predict", setosa())).await;
        seen.push(body_json(response).await["prediction"].clone());
    }
    assert!(seen.iter().all(|p| p == &seen[0]));
}

#[tokio::test]
async fn test_out_of_range_feature_is_rejected() {
    let body = json!({"sepal_length": 5.1, "sepal_width": -3.5, "petal_length": 1.4, "petal_width": 0.2});
    let response = send(test_router().await, json_request("/predict", body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_type"], "validation_error");
    assert_eq!(body["details"]["field"], "sepal_width");
}

#[tokio::test]
async fn test_missing_feature_is_unprocessable() {
    let body = json!({"sepal_length": 5.1, "sepal_width": 3.5, "petal_length": 1.4});
    let response = send(test_router().await, json_request("/predict", body)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = send(test_router().await, request).await;

    assert!(response.status().is_client_error());
}
