// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use model_gateway::{api::start_server, version, AppState, ServerConfig};
use std::time::Instant;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();

    info!("Starting {}", version::get_version_string());
    info!("Build: {}", version::VERSION);
    info!("Models directory: {}", config.models_dir.display());
    info!(
        "Corpus: {} (column '{}', top {})",
        config.corpus_path.display(),
        config.corpus_column,
        config.top_k
    );

    let start = Instant::now();
    let state = match AppState::initialize(&config).await {
        Ok(state) => state,
        Err(e) => {
            error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Models and index ready in {:.1}s ({} titles)",
        start.elapsed().as_secs_f32(),
        state.search.corpus_size()
    );

    start_server(state, &config).await
}
