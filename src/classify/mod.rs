// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sentiment classification of free text

pub mod onnx_classifier;

pub use onnx_classifier::OnnxTextClassifier;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Predicted class for a piece of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Index of the highest-scoring logit
    pub class_id: i64,
    /// Human-readable label from the model config, when it has one
    pub label: Option<String>,
}

#[async_trait]
pub trait TextClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Classification>;

    fn model_name(&self) -> &str;
}

/// Index of the largest value; the lowest index wins ties. NaN never wins.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if v <= current => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
