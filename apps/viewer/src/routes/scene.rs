// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan data and scene endpoints.

use crate::error::ApiError;
use crate::types::{FloorPlanResponse, MeshData, MeshStats, SceneResponse};
use crate::AppState;
use axum::{extract::State, Json};
use floorplan_scene::SceneError;
use std::time::Instant;

/// GET /api/v1/floorplan - Records as currently loaded.
pub async fn get_floorplan(State(state): State<AppState>) -> Json<FloorPlanResponse> {
    Json(state.store.snapshot().await.into())
}

/// GET /api/v1/scene - Composed scene with tessellated meshes.
pub async fn get_scene(State(state): State<AppState>) -> Result<Json<SceneResponse>, ApiError> {
    let snapshot = state.store.snapshot().await;
    let start = Instant::now();

    let scene = snapshot.scene();
    let ground = scene.ground.to_mesh().map_err(SceneError::from)?;

    let mut meshes = Vec::with_capacity(scene.box_count() + 1);
    meshes.push(MeshData::from_ground(&scene.ground, ground));
    meshes.extend(scene.element_meshes().into_iter().map(MeshData::from_element));

    let stats = MeshStats::from_meshes(&meshes, start.elapsed().as_millis() as u64);

    tracing::debug!(
        boxes = scene.box_count(),
        dropped = scene.stats.total_dropped(),
        meshes = stats.total_meshes,
        "Composed scene"
    );

    Ok(Json(SceneResponse {
        loading: snapshot.loading,
        generation: snapshot.generation,
        scene,
        meshes,
        stats,
    }))
}

/// POST /api/v1/refresh - Invalidate and re-request all element documents.
pub async fn refresh(State(state): State<AppState>) -> Json<FloorPlanResponse> {
    let snapshot = state.store.refresh(state.assets.as_ref()).await;
    Json(snapshot.into())
}
