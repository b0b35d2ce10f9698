// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tokenization into padded id/mask tensors and attention-masked pooling

use anyhow::{Context, Result};
use ndarray::{Array2, ArrayView2};
use tokenizers::Tokenizer;

/// Padded tensors for one batch of texts, shape `[batch, max_len]`
#[derive(Debug, Clone)]
pub struct EncodedBatch {
    pub input_ids: Array2<i64>,
    pub attention_mask: Array2<i64>,
    pub token_type_ids: Array2<i64>,
}

impl EncodedBatch {
    pub fn seq_len(&self) -> usize {
        self.input_ids.ncols()
    }
}

/// Tokenize `texts` and right-pad every row to the longest sequence.
pub fn encode_batch(tokenizer: &Tokenizer, texts: &[&str]) -> Result<EncodedBatch> {
    let encodings = texts
        .iter()
        .map(|text| {
            tokenizer
                .encode(*text, true)
                .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))
        })
        .collect::<Result<Vec<_>>>()?;

    // Find max length in batch for padding
    let max_len = encodings
        .iter()
        .map(|enc| enc.get_ids().len())
        .max()
        .unwrap_or(0);

    let mut input_ids = Vec::with_capacity(texts.len() * max_len);
    let mut attention_mask = Vec::with_capacity(texts.len() * max_len);
    let mut token_type_ids = Vec::with_capacity(texts.len() * max_len);

    for encoding in &encodings {
        let ids = encoding.get_ids();
        let mask = encoding.get_attention_mask();
        let type_ids = encoding.get_type_ids();

        input_ids.extend(ids.iter().map(|&id| id as i64));
        attention_mask.extend(mask.iter().map(|&m| m as i64));
        token_type_ids.extend(type_ids.iter().map(|&t| t as i64));

        let padding_needed = max_len - ids.len();
        input_ids.extend(std::iter::repeat(0i64).take(padding_needed));
        attention_mask.extend(std::iter::repeat(0i64).take(padding_needed));
        token_type_ids.extend(std::iter::repeat(0i64).take(padding_needed));
    }

    let shape = (texts.len(), max_len);
    Ok(EncodedBatch {
        input_ids: Array2::from_shape_vec(shape, input_ids)
            .context("Failed to create input_ids array")?,
        attention_mask: Array2::from_shape_vec(shape, attention_mask)
            .context("Failed to create attention_mask array")?,
        token_type_ids: Array2::from_shape_vec(shape, token_type_ids)
            .context("Failed to create token_type_ids array")?,
    })
}

/// Mean over the sequence axis of `[seq_len, hidden]` token embeddings,
/// counting only positions where `mask` is non-zero.
pub fn masked_mean_pool(tokens: ArrayView2<f32>, mask: &[i64]) -> Vec<f32> {
    let (seq_len, hidden_dim) = tokens.dim();

    let mut pooled = vec![0.0f32; hidden_dim];
    let mut sum_mask = 0.0f32;

    for i in 0..seq_len.min(mask.len()) {
        let mask_value = mask[i] as f32;
        if mask_value == 0.0 {
            continue;
        }
        sum_mask += mask_value;
        for (j, value) in pooled.iter_mut().enumerate() {
            *value += tokens[[i, j]] * mask_value;
        }
    }

    for value in &mut pooled {
        *value /= sum_mask.max(1e-9);
    }

    pooled
}
