// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Iris classifier exported to ONNX (skl2onnx)
//!
//! The exported graph takes a single `[1, 4]` f32 input. Its first output is
//! either the predicted label (i64) or, for graphs exported without a label
//! output, per-class scores (f32) that are reduced with argmax.

use anyhow::{Context, Result};
use async_trait::async_trait;
use ndarray::Array2;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::{IrisFeatures, TabularClassifier};
use crate::classify::argmax;
use crate::models::build_session;

#[derive(Clone)]
pub struct OnnxTabularClassifier {
    session: Arc<Mutex<Session>>,
    input_name: String,
    model_name: String,
}

impl OnnxTabularClassifier {
    /// Load the classifier graph from `model_path`.
    pub fn new(model_path: &Path) -> Result<Self> {
        let session = build_session(model_path)?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .context("Iris model declares no inputs")?;

        let model_name = model_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("iris_model")
            .to_string();

        info!(
            "Iris classifier {} loaded (input '{}')",
            model_name, input_name
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            model_name,
        })
    }

    fn run(&self, features: [f32; 4]) -> Result<i64> {
        let input = Array2::from_shape_vec((1, 4), features.to_vec())
            .context("Failed to shape feature tensor")?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("Iris session lock poisoned"))?;

        let outputs = session.run(ort::inputs![
            self.input_name.as_str() => Value::from_array(input)?
        ])?;

        if let Ok(labels) = outputs[0].try_extract_array::<i64>() {
            debug!("Iris label output shape: {:?}", labels.shape());
            return labels
                .iter()
                .next()
                .copied()
                .context("Iris model returned an empty label tensor");
        }

        let scores = outputs[0]
            .try_extract_array::<f32>()
            .context("Iris model output is neither i64 labels nor f32 scores")?;
        let row: Vec<f32> = scores.iter().copied().collect();
        argmax(&row)
            .map(|i| i as i64)
            .context("Iris model returned an empty score tensor")
    }
}

#[async_trait]
impl TabularClassifier for OnnxTabularClassifier {
    async fn predict(&self, features: IrisFeatures) -> Result<i64> {
        let model = self.clone();
        let row = features.to_array();

        tokio::task::spawn_blocking(move || model.run(row))
            .await
            .context("Iris prediction task failed")?
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
