// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Single-step image transforms applied to uploads before PNG re-encoding

use image::{ColorType, DynamicImage, ImageFormat};
use std::io::Cursor;
use tracing::debug;

use super::image_utils::{decode_image_bytes, ImageError};

/// Transform applied by an image route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTransform {
    /// Collapse every pixel to one 8-bit luminance channel
    Grayscale,
    /// Rotate 90 degrees counter-clockwise, swapping width and height
    RotateCcw90,
}

impl ImageTransform {
    pub fn apply(self, image: &DynamicImage) -> DynamicImage {
        match self {
            ImageTransform::Grayscale => to_grayscale(image),
            ImageTransform::RotateCcw90 => rotate_ccw(image),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageTransform::Grayscale => "grayscale",
            ImageTransform::RotateCcw90 => "rotate",
        }
    }
}

/// Convert to single-channel 8-bit luma. Alpha is dropped.
pub fn to_grayscale(image: &DynamicImage) -> DynamicImage {
    DynamicImage::ImageLuma8(image.to_luma8())
}

/// Rotate 90 degrees counter-clockwise on an expanded canvas.
///
/// `rotate270` turns the image 270 degrees clockwise, which is the same
/// as a quarter turn counter-clockwise. The output is `height x width`.
pub fn rotate_ccw(image: &DynamicImage) -> DynamicImage {
    png_compatible(image.rotate270())
}

// PNG has no float sample types.
fn png_compatible(image: DynamicImage) -> DynamicImage {
    match image.color() {
        ColorType::Rgb32F | ColorType::Rgba32F => DynamicImage::ImageRgba8(image.to_rgba8()),
        _ => image,
    }
}

/// Encode an image as PNG bytes
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, ImageError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ImageError::EncodeFailed(e.to_string()))?;
    Ok(bytes)
}

/// Decode an upload, apply one transform and return PNG bytes.
///
/// `declared_type` is the part's content type; it only decides the format
/// when the bytes have no signature.
pub fn process_upload(
    bytes: &[u8],
    declared_type: Option<&str>,
    transform: ImageTransform,
) -> Result<Vec<u8>, ImageError> {
    let (image, info) = decode_image_bytes(bytes, declared_type)?;
    debug!(
        "Decoded {:?} image: {}x{}, {} bytes",
        info.format, info.width, info.height, info.size_bytes
    );

    let transformed = transform.apply(&image);
    encode_png(&transformed)
}
