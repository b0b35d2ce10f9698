// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image codec adapter for the upload routes
//!
//! This module provides:
//! - Content-type validation and decoding of uploaded bytes
//! - Grayscale and 90 degree counter-clockwise rotation transforms
//! - PNG re-encoding of the transformed image

pub mod image_utils;
pub mod transform;

pub use image_utils::{
    check_upload_size, decode_image_bytes, detect_format, validate_content_type, ImageError,
    ImageInfo, MAX_IMAGE_SIZE,
};
pub use transform::{encode_png, process_upload, rotate_ccw, to_grayscale, ImageTransform};
