// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HNSW Index for Title Similarity Search
//!
//! Hierarchical Navigable Small World (HNSW) graph over normalised title
//! embeddings, with exact re-scoring of the candidates it returns.
//!
//! ## Ordering guarantees
//!
//! - **Metric**: cosine similarity (vectors are L2-normalised on insert and query)
//! - **Order**: descending similarity
//! - **Ties**: broken by corpus insertion order, earlier entry first
//! - **Small corpora**: at or below [`EXACT_SCAN_THRESHOLD`] entries every
//!   vector is scored, so results are exact
//!
//! ## Usage
//!
//! ```rust,ignore
//! use model_gateway::vector::hnsw::HnswIndex;
//!
//! let index = HnswIndex::build(entries, 768)?;
//! let results = index.search(&query_embedding, 3)?;
//! for result in results {
//!     println!("{}: {:.3}", result.text, result.score);
//! }
//! ```

use anyhow::{anyhow, Result};
use hnsw_rs::hnsw::{Hnsw, Neighbour};
use hnsw_rs::prelude::*;
use std::cmp::Ordering;

/// Corpora up to this size are scanned exactly instead of via the graph
pub const EXACT_SCAN_THRESHOLD: usize = 1024;

/// Minimum number of graph candidates re-scored per query
const MIN_CANDIDATES: usize = 32;

/// Search result from the index
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Position of the entry in the corpus
    pub position: usize,

    /// Indexed text
    pub text: String,

    /// Cosine similarity (-1.0 to 1.0)
    pub score: f32,
}

/// Nearest-neighbour index over text embeddings
pub struct HnswIndex {
    /// HNSW graph; ids are corpus positions
    hnsw: Hnsw<'static, f32, DistCosine>,

    /// Indexed texts, by corpus position
    texts: Vec<String>,

    /// Normalised vectors, by corpus position
    vectors: Vec<Vec<f32>>,

    /// Number of dimensions
    dimensions: usize,
}

impl HnswIndex {
    /// Build the index from `(text, embedding)` pairs in corpus order
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Vectors have wrong dimensions
    /// - Vectors contain NaN or Infinity values
    pub fn build(entries: Vec<(String, Vec<f32>)>, dimensions: usize) -> Result<Self> {
        for (i, (_, vector)) in entries.iter().enumerate() {
            if vector.len() != dimensions {
                return Err(anyhow!(
                    "Vector {} has wrong dimensions: expected {}, got {}",
                    i,
                    dimensions,
                    vector.len()
                ));
            }

            if vector.iter().any(|&v| !v.is_finite()) {
                return Err(anyhow!("Vector {} contains NaN or Infinity values", i));
            }
        }

        let max_nb_connection = 16;
        let ef_construction = 200;
        // log2(n) layers, clamped to what hnsw_rs supports
        let nb_layer = ((entries.len().max(2) as f32).log2().ceil() as usize).clamp(4, 16);

        let mut hnsw: Hnsw<f32, DistCosine> = Hnsw::new(
            max_nb_connection,
            entries.len().max(1),
            nb_layer,
            ef_construction,
            DistCosine,
        );

        let mut texts = Vec::with_capacity(entries.len());
        let mut vectors = Vec::with_capacity(entries.len());

        for (position, (text, vector)) in entries.into_iter().enumerate() {
            let normalized = normalize_vector(&vector);
            hnsw.insert((normalized.as_slice(), position));
            texts.push(text);
            vectors.push(normalized);
        }

        hnsw.set_searching_mode(true);

        Ok(Self {
            hnsw,
            texts,
            vectors,
            dimensions,
        })
    }

    /// Return the `k` most similar entries, best first
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Query has wrong dimensions
    /// - Query contains NaN or Infinity
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        if query.len() != self.dimensions {
            return Err(anyhow!(
                "Query has wrong dimensions: expected {}, got {}",
                self.dimensions,
                query.len()
            ));
        }

        if query.iter().any(|&v| !v.is_finite()) {
            return Err(anyhow!("Query contains NaN or Infinity values"));
        }

        if self.texts.is_empty() || k == 0 {
            return Ok(vec![]);
        }

        let normalized_query = normalize_vector(query);

        let candidates: Vec<usize> = if self.texts.len() <= EXACT_SCAN_THRESHOLD {
            (0..self.texts.len()).collect()
        } else {
            let knbn = (k * 4).max(MIN_CANDIDATES).min(self.texts.len());
            let ef_search = (knbn * 2).max(50);
            let neighbours: Vec<Neighbour> = self.hnsw.search(&normalized_query, knbn, ef_search);
            neighbours.into_iter().map(|n| n.d_id).collect()
        };

        let mut scored: Vec<(usize, f32)> = candidates
            .into_iter()
            .filter(|&position| position < self.vectors.len())
            .map(|position| (position, dot(&normalized_query, &self.vectors[position])))
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.dedup_by_key(|(position, _)| *position);
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(position, score)| SearchResult {
                position,
                text: self.texts[position].clone(),
                score,
            })
            .collect())
    }

    /// Get number of vectors in index
    pub fn vector_count(&self) -> usize {
        self.texts.len()
    }

    /// Get index dimensions
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Normalize vector for cosine similarity
///
/// Divides vector by its magnitude (L2 norm) to make it unit length.
fn normalize_vector(vector: &[f32]) -> Vec<f32> {
    let magnitude: f32 = vector.iter().map(|&x| x * x).sum::<f32>().sqrt();

    // Handle zero vector
    if magnitude == 0.0 || !magnitude.is_finite() {
        return vector.to_vec();
    }

    vector.iter().map(|&x| x / magnitude).collect()
}
