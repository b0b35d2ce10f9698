// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /upload/ and POST /rotate/ through the real router

use super::common::{
    body_bytes, body_json, corpus, multipart_request, send, state_with, test_router, StubSentiment,
};
use axum::http::{header, StatusCode};
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use model_gateway::api::create_router;
use std::io::Cursor;
use std::sync::Arc;

/// 4x2 RGBA image, red at the top-right corner and blue elsewhere
fn sample_png() -> Vec<u8> {
    let mut img = RgbaImage::from_pixel(4, 2, Rgba([0, 0, 255, 255]));
    img.put_pixel(3, 0, Rgba([255, 0, 0, 255]));

    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn decode(bytes: &[u8]) -> DynamicImage {
    image::load_from_memory_with_format(bytes, ImageFormat::Png).expect("response is a PNG")
}

#[tokio::test]
async fn test_upload_returns_grayscale_png() {
    let response = send(
        test_router().await,
        multipart_request("/upload/", "file", Some("image/png"), &sample_png()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

    let image = decode(&body_bytes(response).await);
    assert_eq!(image.color(), ColorType::L8);
    assert_eq!((image.width(), image.height()), (4, 2));
}

#[tokio::test]
async fn test_rotate_swaps_dimensions_counter_clockwise() {
    let response = send(
        test_router().await,
        multipart_request("/rotate/", "file", Some("image/png"), &sample_png()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

    let image = decode(&body_bytes(response).await).to_rgba8();
    assert_eq!(image.dimensions(), (2, 4));
    // Top-right corner ends up top-left after a quarter turn counter-clockwise
    assert_eq!(image.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    assert_eq!(image.get_pixel(1, 3), &Rgba([0, 0, 255, 255]));
}

#[tokio::test]
async fn test_non_image_content_type_is_rejected() {
    for uri in ["/upload/", "/rotate/"] {
        let response = send(
            test_router().await,
            multipart_request(uri, "file", Some("text/plain"), b"hello"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error_type"], "invalid_format");
        assert_eq!(body["message"], "Invalid file format.");
    }
}

#[tokio::test]
async fn test_missing_content_type_is_rejected() {
    let response = send(
        test_router().await,
        multipart_request("/upload/", "file", None, &sample_png()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid file format.");
}

#[tokio::test]
async fn test_missing_file_field() {
    let response = send(
        test_router().await,
        multipart_request("/upload/", "picture", Some("image/png"), &sample_png()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error_type"], "validation_error");
    assert_eq!(body["details"]["field"], "file");
}

#[tokio::test]
async fn test_corrupt_image_is_decode_failure() {
    let response = send(
        test_router().await,
        multipart_request("/rotate/", "file", Some("image/png"), b"\x89PNG\r\n\x1a\nnot really"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_type"], "decode_failure");
}

/// 4x2 RGB image written in `format`
fn sample_in(format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_pixel(4, 2, Rgb([40, 160, 90]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap();
    bytes
}

/// 64x64 RGB noise, well over a kilobyte once PNG-compressed
fn noisy_png() -> Vec<u8> {
    let img = RgbImage::from_fn(64, 64, |x, y| {
        Rgb([
            ((x * 37 + y * 91) % 256) as u8,
            ((x * x + y * 13) % 256) as u8,
            ((x * 7 + y * y * 3) % 256) as u8,
        ])
    });
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[tokio::test]
async fn test_upload_accepts_other_image_formats() {
    let cases = [
        (ImageFormat::Ico, "image/x-icon"),
        (ImageFormat::Pnm, "image/x-portable-pixmap"),
        (ImageFormat::Qoi, "image/qoi"),
        (ImageFormat::Tga, "image/x-tga"),
    ];

    for (format, content_type) in cases {
        let response = send(
            test_router().await,
            multipart_request("/upload/", "file", Some(content_type), &sample_in(format)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK, "{:?} upload", format);
        let image = decode(&body_bytes(response).await);
        assert_eq!(image.color(), ColorType::L8);
        assert_eq!((image.width(), image.height()), (4, 2));
    }
}

#[tokio::test]
async fn test_rotate_accepts_pnm() {
    let response = send(
        test_router().await,
        multipart_request(
            "/rotate/",
            "file",
            Some("image/x-portable-pixmap"),
            &sample_in(ImageFormat::Pnm),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(decode(&body_bytes(response).await).dimensions(), (2, 4));
}

#[tokio::test]
async fn test_upload_just_over_limit_is_payload_too_large() {
    let png = noisy_png();
    assert!(png.len() > 1024);

    let state = state_with(Arc::new(StubSentiment), corpus()).await;
    let router = create_router(state, png.len() - 1);

    let response = send(
        router,
        multipart_request("/upload/", "file", Some("image/png"), &png),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["error_type"], "payload_too_large");
}

#[tokio::test]
async fn test_upload_at_limit_is_accepted() {
    let png = noisy_png();

    let state = state_with(Arc::new(StubSentiment), corpus()).await;
    let router = create_router(state, png.len());

    let response = send(
        router,
        multipart_request("/rotate/", "file", Some("image/png"), &png),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_body_far_over_limit_is_payload_too_large() {
    let state = state_with(Arc::new(StubSentiment), corpus()).await;
    let router = create_router(state, 1024);

    let payload = vec![0u8; 256 * 1024];
    let response = send(
        router,
        multipart_request("/upload/", "file", Some("image/png"), &payload),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
