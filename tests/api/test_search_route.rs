// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /search/ through the real router

use super::common::{body_json, send, state_with, test_router, StubSentiment};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use model_gateway::{api::create_router, vision::MAX_IMAGE_SIZE};
use std::sync::Arc;

fn search_request(query_string: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/search/{}", query_string))
        .body(Body::empty())
        .unwrap()
}

fn titles(body: &serde_json::Value) -> Vec<String> {
    body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_search_returns_three_ordered_titles() {
    let response = send(test_router().await, search_request("?query=cosmos")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["query"], "cosmos");

    let found = titles(&body);
    assert_eq!(found.len(), 3);
    assert_eq!(found[0], "cosmos");

    let scores: Vec<f64> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["score"].as_f64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_search_is_repeatable() {
    let router = test_router().await;
    let first = body_json(send(router.clone(), search_request("?query=brief%20history")).await).await;
    let second = body_json(send(router, search_request("?query=brief%20history")).await).await;

    assert_eq!(titles(&first), titles(&second));
    assert_eq!(titles(&first)[0], "a brief history of time");
}

#[tokio::test]
async fn test_small_corpus_returns_fewer_results() {
    let state = state_with(
        Arc::new(StubSentiment),
        vec!["cosmos".to_string(), "the selfish gene".to_string()],
    )
    .await;
    let response = send(create_router(state, MAX_IMAGE_SIZE), search_request("?query=gene")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(titles(&body_json(response).await).len(), 2);
}

#[tokio::test]
async fn test_blank_query_is_rejected() {
    for query_string in ["?query=", "?query=%20%20", ""] {
        let response = send(test_router().await, search_request(query_string)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error_type"], "validation_error");
        assert_eq!(body["details"]["field"], "query");
    }
}
