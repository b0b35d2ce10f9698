// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search API request types

use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Query-string parameters for POST /search/
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query; a missing parameter reads as empty
    #[serde(default)]
    pub query: String,
}

impl SearchQuery {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.query.trim().is_empty() {
            return Err(ApiError::validation("query", "Query cannot be empty"));
        }
        Ok(())
    }
}
