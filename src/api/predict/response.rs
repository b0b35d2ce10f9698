// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

use crate::tabular::species_name;

/// Response body for POST /predict
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    /// Class index produced by the model
    pub prediction: i64,

    /// Species name for the class index, when it is a known label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
}

impl PredictResponse {
    pub fn new(prediction: i64) -> Self {
        Self {
            prediction,
            species: species_name(prediction).map(str::to_string),
        }
    }
}
