// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Title search endpoint
//!
//! Provides POST /search/?query=... returning the nearest corpus titles.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::search_handler;
pub use request::SearchQuery;
pub use response::SearchResponse;
