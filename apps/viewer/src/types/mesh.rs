// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data types for serialization.

use floorplan_geometry::Mesh;
use floorplan_scene::{ElementMesh, GroundPlane};
use serde::{Deserialize, Serialize};

/// Kind name used for the ground plane mesh.
pub const GROUND_KIND: &str = "ground";

/// Individual mesh data with geometry and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshData {
    /// Index of the box in the scene; `None` for the ground.
    pub element_index: Option<usize>,
    /// Element kind (e.g., "wall"), or "ground".
    pub kind: String,
    /// Vertex positions (x, y, z triplets).
    pub positions: Vec<f32>,
    /// Vertex normals (x, y, z triplets).
    pub normals: Vec<f32>,
    /// Triangle indices.
    pub indices: Vec<u32>,
    /// RGBA color [r, g, b, a] in 0-1 range.
    pub color: [f32; 4],
}

impl MeshData {
    fn from_mesh(element_index: Option<usize>, kind: String, mesh: Mesh, color: [f32; 4]) -> Self {
        Self {
            element_index,
            kind,
            positions: mesh.positions,
            normals: mesh.normals,
            indices: mesh.indices,
            color,
        }
    }

    /// Tessellated box of one scene element.
    pub fn from_element(element: ElementMesh<'_>) -> Self {
        let color = element.element.material.color.to_rgba();
        let kind = element.element.kind.label().to_lowercase();
        Self::from_mesh(Some(element.index), kind, element.mesh, color)
    }

    pub fn from_ground(ground: &GroundPlane, mesh: Mesh) -> Self {
        Self::from_mesh(None, GROUND_KIND.to_string(), mesh, ground.color.to_rgba())
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_scene::{compose_scene, FloorPlanData, FootprintRecord, Scene};

    #[test]
    fn element_mesh_carries_kind_and_color() {
        let mut data = FloorPlanData::new();
        data.doors = vec![FootprintRecord::new(10.0, 20.0, 30.0, 8.0)];
        let scene = compose_scene(&data);

        let meshes: Vec<MeshData> = scene
            .element_meshes()
            .into_iter()
            .map(MeshData::from_element)
            .collect();

        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].element_index, Some(0));
        assert_eq!(meshes[0].kind, "door");
        assert_eq!(meshes[0].vertex_count(), 24);
        assert_eq!(meshes[0].triangle_count(), 12);
        assert_eq!(meshes[0].color, scene.boxes[0].material.color.to_rgba());
    }

    #[test]
    fn ground_mesh() {
        let scene = Scene::default();
        let mesh = MeshData::from_ground(&scene.ground, scene.ground.to_mesh().unwrap());
        assert_eq!(mesh.element_index, None);
        assert_eq!(mesh.kind, GROUND_KIND);
        assert_eq!(mesh.triangle_count(), 2);
    }
}
