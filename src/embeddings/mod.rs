// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sentence embeddings for the title similarity search

pub mod onnx_model;

pub use onnx_model::OnnxEmbeddingModel;

use anyhow::Result;
use async_trait::async_trait;

/// Text-to-vector model used to embed both corpus titles and queries.
///
/// The same instance must embed both sides, otherwise similarity scores
/// are meaningless.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed many texts, preserving input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Output vector length
    fn dimension(&self) -> usize;

    /// Model name for logs and `/health`
    fn model_name(&self) -> &str;
}
