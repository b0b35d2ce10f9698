// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the model gateway

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-model-gateway-2026-10-17";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2026-10-17";

/// Routes served by this build
pub const FEATURES: &[&str] = &[
    "grayscale-upload",
    "rotate-90-ccw",
    "iris-predict",
    "sentiment-classify",
    "title-search",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Model Gateway {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
    })
}
