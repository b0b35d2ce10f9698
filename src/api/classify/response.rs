// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

use crate::classify::Classification;

/// Response body for POST /classify/
///
/// # Example
/// ```json
/// {"result": 1, "label": "POSITIVE"}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifyResponse {
    /// Index of the winning logit
    pub result: i64,

    /// Label from the model config
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl From<Classification> for ClassifyResponse {
    fn from(c: Classification) -> Self {
        Self {
            result: c.class_id,
            label: c.label,
        }
    }
}
