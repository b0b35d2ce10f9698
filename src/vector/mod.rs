// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod hnsw;

pub use hnsw::{HnswIndex, SearchResult, EXACT_SCAN_THRESHOLD};
