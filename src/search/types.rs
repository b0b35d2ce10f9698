// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for title similarity search

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A corpus title matched by a query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TitleMatch {
    /// Title text as it appears in the corpus
    pub title: String,
    /// Cosine similarity to the query
    pub score: f32,
}

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// Query is empty or whitespace
    #[error("query cannot be empty or contain only whitespace")]
    EmptyQuery,

    /// The corpus produced no titles to index
    #[error("Corpus {path} contains no titles in column '{column}'")]
    EmptyCorpus {
        /// Corpus file
        path: String,
        /// Title column
        column: String,
    },

    /// Corpus file could not be read
    #[error("Failed to load corpus: {0}")]
    CorpusLoad(String),

    /// Embedding or index lookup failed
    #[error("Search inference failed: {0}")]
    Inference(String),
}
