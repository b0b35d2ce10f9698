// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart upload extraction

use axum::body::Bytes;
use axum::http::StatusCode;
use axum_extra::extract::Multipart;
use tracing::debug;

use crate::api::ApiError;
use crate::vision::{check_upload_size, validate_content_type};

/// Name of the multipart field carrying the image
pub const UPLOAD_FIELD: &str = "file";

/// Largest accepted image part, in bytes. Installed on the router as an
/// extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimit(pub usize);

/// The image part of a multipart upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub content_type: String,
    pub bytes: Bytes,
}

/// Pull the `file` field out of the form.
///
/// The declared content type is checked before the body of the part is
/// read, so a non-image upload is rejected without touching its bytes.
/// A part larger than `limit` is rejected with 413.
pub async fn read_upload(
    mut multipart: Multipart,
    limit: UploadLimit,
) -> Result<ImageUpload, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        validate_content_type(content_type.as_deref())?;

        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        debug!(
            "Received upload {:?} ({}, {} bytes)",
            file_name,
            content_type.as_deref().unwrap_or_default(),
            bytes.len()
        );

        check_upload_size(bytes.len(), limit.0)?;

        return Ok(ImageUpload {
            content_type: content_type.unwrap_or_default(),
            bytes,
        });
    }

    Err(ApiError::validation(
        UPLOAD_FIELD,
        format!("multipart field '{}' is required", UPLOAD_FIELD),
    ))
}

fn multipart_error(err: axum_extra::extract::multipart::MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::validation(UPLOAD_FIELD, err.body_text())
    }
}
