// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

/// Request body for POST /classify/
///
/// Any length is accepted; text beyond the model's 512 token window is
/// truncated by the tokenizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifyRequest {
    pub text: String,
}
