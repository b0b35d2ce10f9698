// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Locating model files on disk or on the HuggingFace Hub

use anyhow::{Context, Result};
use hf_hub::api::sync::ApiBuilder;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// ONNX graph locations tried in a Hub repository, in order
const HUB_MODEL_FILES: &[&str] = &["onnx/model.onnx", "model.onnx"];

/// Files making up one transformer model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFiles {
    /// Path to the ONNX graph
    pub model: PathBuf,
    /// Path to `tokenizer.json`
    pub tokenizer: PathBuf,
    /// Path to `config.json`, when the repository ships one
    pub config: Option<PathBuf>,
}

/// Local directory a repository id maps to: `<models_dir>/<org>--<name>`
pub fn local_model_dir(models_dir: &Path, repo_id: &str) -> PathBuf {
    models_dir.join(repo_id.replace('/', "--"))
}

/// Look for a complete model in `dir`
pub fn find_local_files(dir: &Path) -> Option<ModelFiles> {
    let model = ["model.onnx", "onnx/model.onnx"]
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())?;

    let tokenizer = dir.join("tokenizer.json");
    if !tokenizer.exists() {
        return None;
    }

    let config = Some(dir.join("config.json")).filter(|path| path.exists());

    Some(ModelFiles {
        model,
        tokenizer,
        config,
    })
}

/// Resolve the files for `repo_id`.
///
/// The local directory wins; otherwise the files are downloaded into
/// `<models_dir>/.hf-cache` unless `offline` is set.
pub async fn resolve_model_files(
    models_dir: &Path,
    repo_id: &str,
    offline: bool,
) -> Result<ModelFiles> {
    let local_dir = local_model_dir(models_dir, repo_id);
    if let Some(files) = find_local_files(&local_dir) {
        info!("Using local model files for {} from {}", repo_id, local_dir.display());
        return Ok(files);
    }

    if offline {
        anyhow::bail!(
            "Model {} not found in {} and offline mode is enabled",
            repo_id,
            local_dir.display()
        );
    }

    info!("Fetching model {} from the HuggingFace Hub", repo_id);
    let cache_dir = models_dir.join(".hf-cache");
    let repo_id = repo_id.to_string();

    tokio::task::spawn_blocking(move || download_from_hub(&cache_dir, &repo_id))
        .await
        .context("Model download task failed")?
}

fn download_from_hub(cache_dir: &Path, repo_id: &str) -> Result<ModelFiles> {
    let api = ApiBuilder::new()
        .with_cache_dir(cache_dir.to_path_buf())
        .build()
        .context("Failed to create HuggingFace Hub client")?;
    let repo = api.model(repo_id.to_string());

    let mut model = None;
    for name in HUB_MODEL_FILES {
        match repo.get(name) {
            Ok(path) => {
                model = Some(path);
                break;
            }
            Err(e) => warn!("{} has no {}: {}", repo_id, name, e),
        }
    }
    let model = model.with_context(|| format!("No ONNX graph published for {}", repo_id))?;

    let tokenizer = repo
        .get("tokenizer.json")
        .with_context(|| format!("Failed to fetch tokenizer.json for {}", repo_id))?;

    let config = repo.get("config.json").ok();

    Ok(ModelFiles {
        model,
        tokenizer,
        config,
    })
}
