// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Router, shared state and the server loop

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::classify::classify_handler;
use super::image::{grayscale_handler, rotate_handler, UploadLimit};
use super::predict::predict_handler;
use super::search::search_handler;
use crate::classify::{OnnxTextClassifier, TextClassifier};
use crate::config::ServerConfig;
use crate::embeddings::OnnxEmbeddingModel;
use crate::models::resolve_model_files;
use crate::search::{SearchError, TitleSearchService};
use crate::tabular::{OnnxTabularClassifier, TabularClassifier};
use crate::version;

/// Room for multipart boundaries and part headers on top of the image itself.
/// The image part is checked against the exact limit in the handler.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Failures that stop the process before the listener is bound
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to load model {model}: {reason}")]
    ModelLoadFailure { model: String, reason: String },

    #[error("Corpus {path} contains no titles in column '{column}'")]
    EmptyCorpus { path: String, column: String },

    #[error("Failed to build title index: {0}")]
    IndexBuild(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl StartupError {
    fn model(model: impl Into<String>, err: anyhow::Error) -> Self {
        StartupError::ModelLoadFailure {
            model: model.into(),
            reason: format!("{:#}", err),
        }
    }
}

impl From<SearchError> for StartupError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::EmptyCorpus { path, column } => StartupError::EmptyCorpus { path, column },
            other => StartupError::IndexBuild(other.to_string()),
        }
    }
}

/// Models and index shared by every request. Read-only once built.
#[derive(Clone)]
pub struct AppState {
    pub tabular: Arc<dyn TabularClassifier>,
    pub text_classifier: Arc<dyn TextClassifier>,
    pub search: Arc<TitleSearchService>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        tabular: Arc<dyn TabularClassifier>,
        text_classifier: Arc<dyn TextClassifier>,
        search: Arc<TitleSearchService>,
    ) -> Self {
        Self {
            tabular,
            text_classifier,
            search,
            started_at: Instant::now(),
        }
    }

    /// Load every model and build the title index.
    ///
    /// Runs once before the listener is bound; any failure here is fatal.
    pub async fn initialize(config: &ServerConfig) -> Result<Self, StartupError> {
        config
            .validate()
            .map_err(|e| StartupError::Config(e.to_string()))?;

        info!("Loading iris classifier from {}", config.iris_model_path.display());
        let tabular = OnnxTabularClassifier::new(&config.iris_model_path).map_err(|e| {
            StartupError::model(config.iris_model_path.display().to_string(), e)
        })?;

        let text_files =
            resolve_model_files(&config.models_dir, &config.text_model_repo, config.offline)
                .await
                .map_err(|e| StartupError::model(&config.text_model_repo, e))?;
        let text_classifier = OnnxTextClassifier::new(
            config.text_model_repo.clone(),
            &text_files.model,
            &text_files.tokenizer,
            text_files.config.as_deref(),
        )
        .map_err(|e| StartupError::model(&config.text_model_repo, e))?;

        let embedding_files =
            resolve_model_files(&config.models_dir, &config.embedding_model_repo, config.offline)
                .await
                .map_err(|e| StartupError::model(&config.embedding_model_repo, e))?;
        let embedder = OnnxEmbeddingModel::new(
            config.embedding_model_repo.clone(),
            embedding_files.model,
            embedding_files.tokenizer,
        )
        .map_err(|e| StartupError::model(&config.embedding_model_repo, e))?;

        let search = TitleSearchService::from_corpus_file(
            Arc::new(embedder),
            &config.corpus_path,
            &config.corpus_column,
            config.top_k,
        )
        .await?;

        Ok(Self::new(
            Arc::new(tabular),
            Arc::new(text_classifier),
            Arc::new(search),
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthModels {
    pub iris: String,
    pub text_classifier: String,
    pub embedding: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub models: HealthModels,
    pub corpus_size: usize,
    pub uptime_seconds: u64,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: version::VERSION_NUMBER.to_string(),
        models: HealthModels {
            iris: state.tabular.model_name().to_string(),
            text_classifier: state.text_classifier.model_name().to_string(),
            embedding: state.search.model_name().to_string(),
        },
        corpus_size: state.search.corpus_size(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

async fn version_handler() -> Json<serde_json::Value> {
    Json(version::get_version_info())
}

pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/upload/", post(grayscale_handler))
        .route("/rotate/", post(rotate_handler))
        .route("/predict", post(predict_handler))
        .route("/classify/", post(classify_handler))
        .route("/search/", post(search_handler))
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        .layer(Extension(UploadLimit(max_upload_bytes)))
        .layer(DefaultBodyLimit::max(
            max_upload_bytes.saturating_add(MULTIPART_OVERHEAD),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind the listener and serve until Ctrl-C or SIGTERM
pub async fn start_server(state: AppState, config: &ServerConfig) -> anyhow::Result<()> {
    let app = create_router(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
