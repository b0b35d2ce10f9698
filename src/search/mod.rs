// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Title similarity search
//!
//! Loads a column of titles from a spreadsheet, embeds them once at
//! startup and answers nearest-title queries against that fixed corpus.

pub mod corpus;
pub mod service;
pub mod types;

pub use corpus::load_titles;
pub use service::{TitleSearchService, DEFAULT_TOP_K};
pub use types::{SearchError, TitleMatch};
