// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod classify;
pub mod config;
pub mod embeddings;
pub mod models;
pub mod search;
pub mod tabular;
pub mod vector;
pub mod version;
pub mod vision;

pub use api::{create_router, start_server, AppState, StartupError};
pub use config::ServerConfig;
