// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sequence classifier (DistilBERT SST-2 by default) run through ONNX Runtime

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Value;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info, warn};

use super::{argmax, Classification, TextClassifier};
use crate::models::{build_session, encode_batch, has_input};

/// Maximum sequence length fed to the encoder
const MAX_LENGTH: usize = 512;

/// The subset of a transformers `config.json` we read
#[derive(Debug, Default, Deserialize)]
struct ModelConfig {
    #[serde(default)]
    id2label: HashMap<String, String>,
}

/// Parse `id2label` out of a transformers model config
pub fn load_id2label(config_path: &Path) -> Result<HashMap<i64, String>> {
    let raw = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    parse_id2label(&raw)
}

fn parse_id2label(raw: &str) -> Result<HashMap<i64, String>> {
    let config: ModelConfig = serde_json::from_str(raw).context("Invalid model config")?;

    config
        .id2label
        .into_iter()
        .map(|(id, label)| {
            id.parse::<i64>()
                .map(|id| (id, label))
                .with_context(|| format!("Non-numeric id2label key '{}'", id))
        })
        .collect()
}

#[derive(Clone)]
pub struct OnnxTextClassifier {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    id2label: Arc<HashMap<i64, String>>,
    model_name: String,
    uses_token_type_ids: bool,
}

impl OnnxTextClassifier {
    /// Load graph, tokenizer and (optionally) the label map.
    pub fn new(
        model_name: impl Into<String>,
        model_path: &Path,
        tokenizer_path: &Path,
        config_path: Option<&Path>,
    ) -> Result<Self> {
        let model_name = model_name.into();

        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }

        let session = build_session(model_path)?;
        let uses_token_type_ids = has_input(&session, "token_type_ids");

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer
            .with_padding(None)
            .with_truncation(Some(TruncationParams {
                max_length: MAX_LENGTH,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {}", e))?;

        let id2label = match config_path {
            Some(path) => load_id2label(path).unwrap_or_else(|e| {
                warn!("No labels for {}: {:#}", model_name, e);
                HashMap::new()
            }),
            None => HashMap::new(),
        };

        info!(
            "Text classifier {} loaded ({} labels)",
            model_name,
            id2label.len()
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            id2label: Arc::new(id2label),
            model_name,
            uses_token_type_ids,
        })
    }

    fn run(&self, text: &str) -> Result<Classification> {
        let batch = encode_batch(&self.tokenizer, &[text])?;
        debug!("Classifying {} tokens", batch.seq_len());

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("Classifier session lock poisoned"))?;

        let outputs = if self.uses_token_type_ids {
            session.run(ort::inputs![
                "input_ids" => Value::from_array(batch.input_ids)?,
                "attention_mask" => Value::from_array(batch.attention_mask)?,
                "token_type_ids" => Value::from_array(batch.token_type_ids)?
            ])?
        } else {
            session.run(ort::inputs![
                "input_ids" => Value::from_array(batch.input_ids)?,
                "attention_mask" => Value::from_array(batch.attention_mask)?
            ])?
        };

        // logits: [1, num_labels]
        let logits = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract logits")?;
        let row: Vec<f32> = logits.iter().copied().collect();

        let class_id = argmax(&row).context("Classifier returned no usable logits")? as i64;

        Ok(Classification {
            class_id,
            label: self.id2label.get(&class_id).cloned(),
        })
    }
}

#[async_trait]
impl TextClassifier for OnnxTextClassifier {
    async fn classify(&self, text: &str) -> Result<Classification> {
        let model = self.clone();
        let text = text.to_string();

        tokio::task::spawn_blocking(move || model.run(&text))
            .await
            .context("Classification task failed")?
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
