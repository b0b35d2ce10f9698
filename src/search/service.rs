// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Title search service
//!
//! Owns the embedding model and the index built over the corpus. The index
//! is built once and never updated; a corpus change needs a restart.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::corpus::load_titles;
use super::types::{SearchError, TitleMatch};
use crate::embeddings::TextEmbedder;
use crate::vector::HnswIndex;

/// Default number of titles returned per query
pub const DEFAULT_TOP_K: usize = 3;

/// Similarity search over an immutable title corpus
pub struct TitleSearchService {
    embedder: Arc<dyn TextEmbedder>,
    index: HnswIndex,
    top_k: usize,
}

impl TitleSearchService {
    /// Embed every title and build the index.
    ///
    /// # Errors
    /// - `SearchError::EmptyCorpus` when `titles` is empty
    /// - `SearchError::Inference` when embedding or index construction fails
    pub async fn build(
        embedder: Arc<dyn TextEmbedder>,
        titles: Vec<String>,
        top_k: usize,
        source: &str,
        column: &str,
    ) -> Result<Self, SearchError> {
        if titles.is_empty() {
            return Err(SearchError::EmptyCorpus {
                path: source.to_string(),
                column: column.to_string(),
            });
        }

        let start = Instant::now();
        let embeddings = embedder
            .embed_batch(&titles)
            .await
            .map_err(|e| SearchError::Inference(e.to_string()))?;

        if embeddings.len() != titles.len() {
            return Err(SearchError::Inference(format!(
                "embedded {} of {} titles",
                embeddings.len(),
                titles.len()
            )));
        }

        let entries: Vec<(String, Vec<f32>)> = titles.into_iter().zip(embeddings).collect();
        let index = HnswIndex::build(entries, embedder.dimension())
            .map_err(|e| SearchError::Inference(e.to_string()))?;

        info!(
            "Indexed {} titles with {} in {:?}",
            index.vector_count(),
            embedder.model_name(),
            start.elapsed()
        );

        Ok(Self {
            embedder,
            index,
            top_k,
        })
    }

    /// Load `column` from `path` and build the service from it
    pub async fn from_corpus_file(
        embedder: Arc<dyn TextEmbedder>,
        path: &Path,
        column: &str,
        top_k: usize,
    ) -> Result<Self, SearchError> {
        let titles =
            load_titles(path, column).map_err(|e| SearchError::CorpusLoad(format!("{:#}", e)))?;

        Self::build(embedder, titles, top_k, &path.display().to_string(), column).await
    }

    /// Return the `top_k` titles nearest to `query`, best first
    pub async fn search(&self, query: &str) -> Result<Vec<TitleMatch>, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let start = Instant::now();
        let query_embedding = self
            .embedder
            .embed(query)
            .await
            .map_err(|e| SearchError::Inference(e.to_string()))?;

        let results = self
            .index
            .search(&query_embedding, self.top_k)
            .map_err(|e| SearchError::Inference(e.to_string()))?;

        debug!(
            "Search for '{}' matched {} titles in {:?}",
            query,
            results.len(),
            start.elapsed()
        );

        Ok(results
            .into_iter()
            .map(|r| TitleMatch {
                title: r.text,
                score: r.score,
            })
            .collect())
    }

    pub fn corpus_size(&self) -> usize {
        self.index.vector_count()
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn model_name(&self) -> &str {
        self.embedder.model_name()
    }
}
