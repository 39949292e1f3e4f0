// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Health check endpoint.

use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    /// An upload to the detection backend is in flight.
    pub upload_in_progress: bool,
}

/// API information response.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

/// Endpoint information.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// GET /api/v1/health - Health check endpoint.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service: "floorplan-viewer",
        upload_in_progress: state.uploader.is_busy(),
    })
}

/// GET / - API information endpoint.
pub async fn info() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        service: "floorplan-viewer",
        version: env!("CARGO_PKG_VERSION"),
        description: "Floor plan detection uploads and 3D scene composition",
        endpoints: vec![
            EndpointInfo {
                method: "GET",
                path: "/api/v1/health",
                description: "Health check endpoint",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/floorplan",
                description: "Loaded walls, doors, windows and furniture records",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/scene",
                description: "Composed scene with tessellated meshes",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/v1/refresh",
                description: "Re-request all element documents",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/v1/upload",
                description: "Upload a floor plan image for detection",
            },
            EndpointInfo {
                method: "GET",
                path: "/",
                description: "API information",
            },
        ],
    })
}
