// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use super::common::{body_json, send, test_router};
use axum::body::Body;
use axum::http::{Request, StatusCode};

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_reports_models_and_corpus() {
    let response = send(test_router().await, get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["corpus_size"], 5);
    assert_eq!(body["models"]["iris"], "stub-iris");
    assert_eq!(body["models"]["text_classifier"], "stub-sentiment");
    assert_eq!(body["models"]["embedding"], "letter-bag");
    assert_eq!(body["version"], model_gateway::version::VERSION_NUMBER);
}

#[tokio::test]
async fn test_version_lists_features() {
    let response = send(test_router().await, get("/version")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["features"].as_array().unwrap().len(), model_gateway::version::FEATURES.len());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = send(test_router().await, get("/nope")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_image_route_requires_post() {
    let response = send(test_router().await, get("/upload/")).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
