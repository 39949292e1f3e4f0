// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use super::MeshData;
use crate::services::{Notice, Snapshot, UploadOutcome};
use floorplan_scene::{FloorPlanData, Scene};
use serde::Serialize;

/// Raw record lists as currently held by the store.
#[derive(Debug, Clone, Serialize)]
pub struct FloorPlanResponse {
    /// True while a refresh is still in flight.
    pub loading: bool,
    /// Number of refreshes applied so far.
    pub generation: u64,
    pub data: FloorPlanData,
}

impl From<Snapshot> for FloorPlanResponse {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            loading: snapshot.loading,
            generation: snapshot.generation,
            data: snapshot.data,
        }
    }
}

/// Composed scene with tessellated geometry.
#[derive(Debug, Clone, Serialize)]
pub struct SceneResponse {
    pub loading: bool,
    pub generation: u64,
    /// Renderer-neutral scene description.
    pub scene: Scene,
    /// Ground mesh first, then one mesh per box.
    pub meshes: Vec<MeshData>,
    pub stats: MeshStats,
}

/// Tessellation statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MeshStats {
    /// Total number of meshes generated.
    pub total_meshes: usize,
    /// Total number of vertices.
    pub total_vertices: usize,
    /// Total number of triangles.
    pub total_triangles: usize,
    /// Time spent composing and tessellating (ms).
    pub compose_time_ms: u64,
}

impl MeshStats {
    pub fn from_meshes(meshes: &[MeshData], compose_time_ms: u64) -> Self {
        Self {
            total_meshes: meshes.len(),
            total_vertices: meshes.iter().map(MeshData::vertex_count).sum(),
            total_triangles: meshes.iter().map(MeshData::triangle_count).sum(),
            compose_time_ms,
        }
    }
}

/// Result of an upload trigger.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub outcome: UploadOutcome,
    /// Notices posted while the upload settled.
    pub notices: Vec<Notice>,
    /// Store generation after the post-upload refresh, if one ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<u64>,
}
