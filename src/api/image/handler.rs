// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image transform endpoint handlers

use axum::Extension;
use axum_extra::extract::Multipart;
use std::time::Instant;
use tracing::{info, warn};

use super::request::{read_upload, UploadLimit};
use super::response::PngResponse;
use crate::api::ApiError;
use crate::vision::{process_upload, ImageTransform};

/// POST /upload/ - Convert an uploaded image to grayscale
///
/// # Request
/// Multipart form with an image in the `file` field.
///
/// # Response
/// PNG bytes with a single 8-bit luminance channel.
///
/// # Errors
/// - 400 Bad Request: not an image (`Invalid file format.`), missing field, undecodable bytes
/// - 413 Payload Too Large: upload above the configured size limit
pub async fn grayscale_handler(
    Extension(limit): Extension<UploadLimit>,
    multipart: Multipart,
) -> Result<PngResponse, ApiError> {
    transform_upload(multipart, limit, ImageTransform::Grayscale).await
}

/// POST /rotate/ - Rotate an uploaded image 90 degrees counter-clockwise
///
/// The canvas is expanded, so a `W x H` upload comes back as `H x W`.
pub async fn rotate_handler(
    Extension(limit): Extension<UploadLimit>,
    multipart: Multipart,
) -> Result<PngResponse, ApiError> {
    transform_upload(multipart, limit, ImageTransform::RotateCcw90).await
}

async fn transform_upload(
    multipart: Multipart,
    limit: UploadLimit,
    transform: ImageTransform,
) -> Result<PngResponse, ApiError> {
    let start = Instant::now();

    let upload = read_upload(multipart, limit).await.map_err(|e| {
        warn!("Rejected {} upload: {}", transform.as_str(), e);
        e
    })?;

    let size = upload.bytes.len();
    let png = tokio::task::spawn_blocking(move || {
        process_upload(&upload.bytes, Some(upload.content_type.as_str()), transform)
    })
    .await
    .map_err(|e| ApiError::InternalError(format!("Image task failed: {}", e)))?
    .map_err(|e| {
        warn!("Failed to {} upload: {}", transform.as_str(), e);
        ApiError::from(e)
    })?;

    info!(
        "{} complete: {} bytes in, {} bytes out, {}ms",
        transform.as_str(),
        size,
        png.len(),
        start.elapsed().as_millis()
    );

    Ok(PngResponse(png))
}
