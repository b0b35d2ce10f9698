// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

use crate::search::TitleMatch;

/// Response body for POST /search/
///
/// # Example
/// ```json
/// {"query": "우주", "results": [{"title": "코스모스", "score": 0.71}]}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    /// The query as received
    pub query: String,

    /// Nearest titles, most similar first
    pub results: Vec<TitleMatch>,
}
