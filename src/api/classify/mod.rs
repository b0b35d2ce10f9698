// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sentiment classification endpoint
//!
//! Provides POST /classify/.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::classify_handler;
pub use request::ClassifyRequest;
pub use response::ClassifyResponse;
