// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end checks against exported models.
//!
//! Expects `./models/iris_model.onnx`, the SST-2 and ko-sroberta exports
//! under `./models/<org>--<name>/` and `./science_books.xlsx`.

use clap::Parser;
use model_gateway::{tabular::IrisFeatures, AppState, ServerConfig};

async fn real_state() -> AppState {
    let config = ServerConfig::try_parse_from(["model-gateway", "--offline"]).unwrap();
    AppState::initialize(&config)
        .await
        .expect("models and corpus should load")
}

#[tokio::test]
#[ignore] // Only run if model files are exported
async fn test_iris_prediction_is_stable() {
    let state = real_state().await;
    let setosa = IrisFeatures {
        sepal_length: 5.1,
        sepal_width: 3.5,
        petal_length: 1.4,
        petal_width: 0.2,
    };

    let first = state.tabular.predict(setosa).await.unwrap();
    assert_eq!(first, 0);
    for _ in 0..3 {
        assert_eq!(state.tabular.predict(setosa).await.unwrap(), first);
    }
}

#[tokio::test]
#[ignore] // Only run if model files are exported
async fn test_sentiment_within_label_set() {
    let state = real_state().await;
    let result = state
        .text_classifier
        .classify("I love this movie")
        .await
        .unwrap();
    assert!(result.class_id == 0 || result.class_id == 1);
    assert_eq!(result.label.as_deref(), Some("POSITIVE"));
}

#[tokio::test]
#[ignore] // Only run if model files are exported
async fn test_title_search_returns_three() {
    let state = real_state().await;
    let first = state.search.search("우주").await.unwrap();
    let second = state.search.search("우주").await.unwrap();

    assert_eq!(first.len(), 3.min(state.search.corpus_size()));
    assert_eq!(first, second);
}
