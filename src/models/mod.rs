// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Model file resolution and shared ONNX Runtime plumbing
//!
//! Every model served by the gateway is an ONNX graph. Transformer models
//! also ship a HuggingFace `tokenizer.json` and usually a `config.json`.
//! Files are looked up in the local models directory first and fetched
//! from the HuggingFace Hub only when missing.

pub mod downloading;
pub mod encoding;
pub mod session;

pub use downloading::{resolve_model_files, ModelFiles};
pub use encoding::{encode_batch, masked_mean_pool, EncodedBatch};
pub use session::{build_session, has_input};
