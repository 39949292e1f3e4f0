// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP routes and the router they are mounted on.

pub mod health;
pub mod scene;
pub mod upload;

use crate::config::Config;
use crate::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the CORS layer from the configured origins; `*` allows any origin.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the API router.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.max_file_size_mb * 1024 * 1024;
    let cors = cors_layer(&state.config);

    Router::new()
        // Root endpoint - API information
        .route("/", get(health::info))
        // Health check
        .route("/api/v1/health", get(health::check))
        // Floor plan data and composed scene
        .route("/api/v1/floorplan", get(scene::get_floorplan))
        .route("/api/v1/scene", get(scene::get_scene))
        .route("/api/v1/refresh", post(scene::refresh))
        // Upload to the detection backend
        .route("/api/v1/upload", post(upload::upload))
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
