// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Embedding Model Wrapper
//!
//! This module provides a wrapper around ONNX Runtime for running a
//! sentence-transformer model (default: jhgan/ko-sroberta-multitask).
//!
//! Features:
//! - ONNX model loading from disk
//! - GPU acceleration via CUDA (with automatic CPU fallback)
//! - Tokenization with truncation to the model's max length
//! - Single and batch embedding generation
//! - Mean pooling over token embeddings
//! - Output dimension discovered from the graph at load time

use anyhow::{Context, Result};
use async_trait::async_trait;
use ndarray::Axis;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};

use super::TextEmbedder;
use crate::models::{build_session, encode_batch, has_input, masked_mean_pool};

/// Maximum sequence length fed to the encoder
const MAX_LENGTH: usize = 512;

/// Titles embedded per forward pass while building the index
const BATCH_SIZE: usize = 32;

/// ONNX-based sentence embedding model
///
/// # Thread Safety
/// All fields are wrapped in Arc for cheap cloning and thread-safe sharing.
/// `Session::run` needs `&mut`, so the session sits behind a Mutex held only
/// for the forward pass.
#[derive(Clone)]
pub struct OnnxEmbeddingModel {
    /// ONNX Runtime session
    session: Arc<Mutex<Session>>,

    /// Sentence-piece / WordPiece tokenizer
    tokenizer: Arc<Tokenizer>,

    /// Model name (e.g., "jhgan/ko-sroberta-multitask")
    model_name: String,

    /// Output dimension, probed at load time
    dimension: usize,

    /// Whether the graph takes a `token_type_ids` input
    uses_token_type_ids: bool,
}

impl std::fmt::Debug for OnnxEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbeddingModel")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .field("uses_token_type_ids", &self.uses_token_type_ids)
            .finish_non_exhaustive()
    }
}

impl OnnxEmbeddingModel {
    /// Creates a new ONNX embedding model from disk paths
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found or invalid
    /// - Tokenizer file not found or invalid
    /// - ONNX Runtime initialization fails
    /// - The probe inference does not produce `[batch, seq_len, hidden]`
    pub fn new<P: AsRef<Path>>(
        model_name: impl Into<String>,
        model_path: P,
        tokenizer_path: P,
    ) -> Result<Self> {
        let model_name = model_name.into();
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }

        info!("Initializing ONNX embedding model {}", model_name);
        let session = build_session(model_path)?;
        let uses_token_type_ids = has_input(&session, "token_type_ids");

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer
            .with_padding(None)
            .with_truncation(Some(TruncationParams {
                max_length: MAX_LENGTH,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {}", e))?;

        let mut model = Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            model_name,
            dimension: 0,
            uses_token_type_ids,
        };

        // Probe the hidden size with a test inference
        let probe = model
            .run_batch(&["validation test"])
            .context("Embedding model validation failed")?;
        model.dimension = probe.first().map(Vec::len).unwrap_or(0);
        if model.dimension == 0 {
            anyhow::bail!("Embedding model {} produced empty vectors", model.model_name);
        }

        info!(
            "ONNX embedding model {} loaded ({} dimensions)",
            model.model_name, model.dimension
        );

        Ok(model)
    }

    /// Tokenize, run the encoder and mean-pool every row.
    fn run_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let batch = encode_batch(&self.tokenizer, texts)?;
        let masks: Vec<Vec<i64>> = batch
            .attention_mask
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect();

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("Embedding session lock poisoned"))?;

        let outputs = if self.uses_token_type_ids {
            session.run(ort::inputs![
                "input_ids" => Value::from_array(batch.input_ids)?,
                "attention_mask" => Value::from_array(batch.attention_mask)?,
                "token_type_ids" => Value::from_array(batch.token_type_ids)?
            ])?
        } else {
            session.run(ort::inputs![
                "input_ids" => Value::from_array(batch.input_ids)?,
                "attention_mask" => Value::from_array(batch.attention_mask)?
            ])?
        };

        // Use index [0] instead of name since different exports name it differently
        let output_array = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        let shape = output_array.shape().to_vec();
        debug!("Embedding output shape: {:?}", shape);

        match shape.len() {
            // Token-level output: [batch, seq_len, hidden_dim]
            3 => {
                let mut embeddings = Vec::with_capacity(texts.len());
                for (batch_idx, mask) in masks.iter().enumerate() {
                    let item = output_array
                        .index_axis(Axis(0), batch_idx)
                        .into_dimensionality::<ndarray::Ix2>()
                        .context("Unexpected token embedding layout")?;
                    embeddings.push(masked_mean_pool(item, mask));
                }
                Ok(embeddings)
            }
            // Already pooled: [batch, hidden_dim]
            2 => Ok(output_array
                .axis_iter(Axis(0))
                .map(|row| row.iter().copied().collect())
                .collect()),
            _ => anyhow::bail!(
                "Model outputs unexpected dimensions: {:?} (expected [batch, seq_len, hidden])",
                shape
            ),
        }
    }
}

#[async_trait]
impl TextEmbedder for OnnxEmbeddingModel {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let model = self.clone();
        let text = text.to_string();

        let mut embeddings =
            tokio::task::spawn_blocking(move || model.run_batch(&[text.as_str()]))
                .await
                .context("Embedding task failed")??;

        embeddings
            .pop()
            .context("Embedding model returned no vectors")
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let model = self.clone();
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut embeddings = Vec::with_capacity(texts.len());
            for chunk in texts.chunks(BATCH_SIZE) {
                let refs: Vec<&str> = chunk.iter().map(String::as_str).collect();
                embeddings.extend(model.run_batch(&refs)?);
            }
            Ok::<_, anyhow::Error>(embeddings)
        })
        .await
        .context("Embedding task failed")?
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
