// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image upload endpoints
//!
//! Provides POST /upload/ (grayscale) and POST /rotate/ (90 degrees
//! counter-clockwise). Both return the transformed image as PNG.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{grayscale_handler, rotate_handler};
pub use request::{read_upload, ImageUpload, UploadLimit, UPLOAD_FIELD};
pub use response::PngResponse;
