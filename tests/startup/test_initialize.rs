// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Startup failures surface before the listener is bound

use clap::Parser;
use model_gateway::{AppState, ServerConfig, StartupError};

fn config(args: &[&str]) -> ServerConfig {
    let mut argv = vec!["model-gateway"];
    argv.extend_from_slice(args);
    ServerConfig::try_parse_from(argv).unwrap()
}

#[tokio::test]
async fn test_missing_iris_model_is_model_load_failure() {
    let models = tempfile::tempdir().unwrap();
    let iris = models.path().join("iris_model.onnx");

    let config = config(&[
        "--models-dir",
        models.path().to_str().unwrap(),
        "--iris-model",
        iris.to_str().unwrap(),
        "--offline",
    ]);

    match AppState::initialize(&config).await {
        Err(StartupError::ModelLoadFailure { model, .. }) => {
            assert!(model.contains("iris_model.onnx"))
        }
        Err(other) => panic!("expected ModelLoadFailure, got {}", other),
        Ok(_) => panic!("startup should fail without an iris model"),
    }
}

#[tokio::test]
async fn test_invalid_config_fails_before_loading() {
    let config = config(&["--top-k", "0", "--offline"]);

    assert!(matches!(
        AppState::initialize(&config).await,
        Err(StartupError::Config(_))
    ));
}
