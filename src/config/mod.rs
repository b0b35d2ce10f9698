// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Server configuration from command-line flags and environment variables

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::search::DEFAULT_TOP_K;
use crate::vision::MAX_IMAGE_SIZE;

/// Model gateway: image transforms, iris prediction, sentiment and title search over HTTP
#[derive(Parser, Debug, Clone)]
#[command(name = "model-gateway")]
#[command(version)]
#[command(about = "HTTP routes over image and ML models", long_about = None)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8000")]
    pub listen_addr: SocketAddr,

    /// Directory holding exported models and the hub cache
    #[arg(long, env = "MODELS_DIR", default_value = "./models")]
    pub models_dir: PathBuf,

    /// ONNX export of the iris classifier
    #[arg(long = "iris-model", env = "IRIS_MODEL_PATH", default_value = "./models/iris_model.onnx")]
    pub iris_model_path: PathBuf,

    /// Hub repo id (or local directory name) of the sentiment classifier
    #[arg(
        long,
        env = "TEXT_MODEL_REPO",
        default_value = "distilbert-base-uncased-finetuned-sst-2-english"
    )]
    pub text_model_repo: String,

    /// Hub repo id (or local directory name) of the sentence embedding model
    #[arg(long, env = "EMBEDDING_MODEL_REPO", default_value = "jhgan/ko-sroberta-multitask")]
    pub embedding_model_repo: String,

    /// Spreadsheet or CSV file holding the title corpus
    #[arg(long, env = "CORPUS_PATH", default_value = "./science_books.xlsx")]
    pub corpus_path: PathBuf,

    /// Header of the title column in the corpus file
    #[arg(long, env = "CORPUS_COLUMN", default_value = "제목")]
    pub corpus_column: String,

    /// Titles returned per search
    #[arg(long = "top-k", env = "SEARCH_TOP_K", default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Largest accepted request body for uploads
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = MAX_IMAGE_SIZE)]
    pub max_upload_bytes: usize,

    /// Never contact the hub; only use models already under models-dir
    #[arg(long, env = "HF_OFFLINE")]
    pub offline: bool,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            anyhow::bail!("top-k must be at least 1");
        }
        if self.max_upload_bytes == 0 {
            anyhow::bail!("max-upload-bytes must be greater than 0");
        }
        if self.corpus_column.trim().is_empty() {
            anyhow::bail!("corpus-column cannot be empty");
        }
        Ok(())
    }
}
