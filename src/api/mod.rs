// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod classify;
pub mod errors;
pub mod http_server;
pub mod image;
pub mod predict;
pub mod search;

pub use classify::{classify_handler, ClassifyRequest, ClassifyResponse};
pub use errors::{ApiError, ErrorResponse, INVALID_FILE_FORMAT};
pub use http_server::{create_router, start_server, AppState, HealthResponse, StartupError};
pub use image::{grayscale_handler, rotate_handler, PngResponse};
pub use predict::{predict_handler, PredictRequest, PredictResponse};
pub use search::{search_handler, SearchQuery, SearchResponse};
