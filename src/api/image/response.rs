// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::header;
use axum::response::{IntoResponse, Response};

/// Encoded PNG returned as the raw response body
#[derive(Debug, Clone)]
pub struct PngResponse(pub Vec<u8>);

impl IntoResponse for PngResponse {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "image/png")], self.0).into_response()
    }
}
