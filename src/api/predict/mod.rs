// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Iris prediction endpoint
//!
//! Provides POST /predict.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::predict_handler;
pub use request::PredictRequest;
pub use response::PredictResponse;
