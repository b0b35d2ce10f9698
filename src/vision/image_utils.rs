// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image loading and validation for uploaded files

use image::{DynamicImage, ImageFormat};
use thiserror::Error;

/// Default upload limit (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Media type prefix every upload must declare
pub const IMAGE_MEDIA_PREFIX: &str = "image/";

/// Custom error types for image processing
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Invalid file format.")]
    InvalidFormat,

    #[error("Image data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Image data is empty")]
    EmptyData,

    #[error("Failed to encode image: {0}")]
    EncodeFailed(String),
}

impl ImageError {
    /// True when the error was caused by the uploaded bytes rather than the encoder
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ImageError::EncodeFailed(_))
    }
}

/// Image information extracted during loading
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Detected format
    pub format: ImageFormat,
    /// Size in bytes
    pub size_bytes: usize,
}

/// Check the declared content type of an upload.
///
/// Only the declared type is inspected; the bytes are not touched, so a
/// rejected upload is never decoded.
pub fn validate_content_type(content_type: Option<&str>) -> Result<(), ImageError> {
    match content_type {
        Some(ct) if ct.trim().to_ascii_lowercase().starts_with(IMAGE_MEDIA_PREFIX) => Ok(()),
        _ => Err(ImageError::InvalidFormat),
    }
}

/// Reject an upload whose body is larger than `max_bytes`
pub fn check_upload_size(len: usize, max_bytes: usize) -> Result<(), ImageError> {
    if len > max_bytes {
        return Err(ImageError::TooLarge(len, max_bytes));
    }
    Ok(())
}

/// Decode raw image bytes (for multipart uploads)
///
/// # Arguments
/// * `bytes` - Raw image bytes
/// * `declared_type` - Content type of the multipart part, used when the
///   bytes carry no recognisable signature
///
/// # Returns
/// * `Ok((DynamicImage, ImageInfo))` - The decoded image and metadata
/// * `Err(ImageError)` - If decoding fails
pub fn decode_image_bytes(
    bytes: &[u8],
    declared_type: Option<&str>,
) -> Result<(DynamicImage, ImageInfo), ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    let format = detect_format(bytes, declared_type)?;

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    let info = ImageInfo {
        width: img.width(),
        height: img.height(),
        format,
        size_bytes: bytes.len(),
    };

    Ok((img, info))
}

/// Detect the image format from its signature, falling back to the
/// declared media type for formats without one (TGA).
///
/// # Returns
/// * `Ok(ImageFormat)` - Detected format
/// * `Err(ImageError::UnsupportedFormat)` - If neither source names a known format
pub fn detect_format(
    bytes: &[u8],
    declared_type: Option<&str>,
) -> Result<ImageFormat, ImageError> {
    image::guess_format(bytes)
        .ok()
        .or_else(|| {
            declared_type
                .map(|ct| ct.split(';').next().unwrap_or_default().trim().to_ascii_lowercase())
                .and_then(ImageFormat::from_mime_type)
        })
        .ok_or(ImageError::UnsupportedFormat)
}
