// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Renderer-neutral scene description
//!
//! A [`Scene`] carries everything an off-the-shelf renderer needs: the
//! element boxes with their materials, a ground plane, lighting, a sky
//! backdrop and an orbit camera. Coordinates are Y-up; a footprint's
//! `(x, y)` lands on the scene's `(x, z)`.

use crate::types::{Color, ElementKind, Material};
use floorplan_geometry::{plane_mesh, BoxPrimitive, Mesh, Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// One placed box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneBox {
    pub kind: ElementKind,
    /// Box center `[x, y, z]`
    pub position: [f64; 3],
    /// Full extents `[x, y, z]` before rotation
    pub size: [f64; 3],
    /// Rotation about the vertical axis in radians
    pub rotation_y: f64,
    pub material: Material,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl SceneBox {
    /// Geometry primitive for tessellation. Extents are taken as magnitudes.
    pub fn primitive(&self) -> BoxPrimitive {
        let [x, y, z] = self.position;
        let [sx, sy, sz] = self.size;
        BoxPrimitive::new(
            Point3::new(x, y, z),
            Vector3::new(sx.abs(), sy.abs(), sz.abs()),
            self.rotation_y,
        )
    }

    /// Whether this box was turned a quarter turn to run along the depth axis
    pub fn is_rotated(&self) -> bool {
        self.rotation_y != 0.0
    }
}

/// Horizontal ground plane through the origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundPlane {
    /// Extent along X and Z
    pub size: [f64; 2],
    pub position: [f64; 3],
    /// Rotation about X that lays a vertical plane flat
    pub rotation_x: f64,
    pub color: Color,
    pub receive_shadow: bool,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            size: [5000.0, 5000.0],
            position: [0.0, 0.0, 0.0],
            rotation_x: -FRAC_PI_2,
            color: Color::rgb(0xF0, 0xF0, 0xF0),
            receive_shadow: true,
        }
    }
}

impl GroundPlane {
    pub fn to_mesh(&self) -> floorplan_geometry::Result<Mesh> {
        plane_mesh(self.size[0], self.size[1])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self { intensity: 0.4 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub position: [f64; 3],
    pub intensity: f32,
    pub cast_shadow: bool,
    /// Shadow map resolution (square)
    pub shadow_map_size: u32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            position: [300.0, 400.0, 300.0],
            intensity: 1.0,
            cast_shadow: true,
            shadow_map_size: 2048,
        }
    }
}

/// Sky backdrop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sky {
    pub sun_position: [f64; 3],
}

impl Default for Sky {
    fn default() -> Self {
        Self {
            sun_position: [100.0, 50.0, 100.0],
        }
    }
}

/// Image-based lighting preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub preset: String,
    /// Whether the preset is also drawn as the background
    pub background: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            preset: "sunset".to_string(),
            background: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: [f64; 3],
    pub target: [f64; 3],
    /// Vertical field of view in degrees
    pub fov: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: [0.0, 500.0, 1000.0],
            target: [0.0, 0.0, 0.0],
            fov: 55.0,
        }
    }
}

/// Orbit camera controls. `None` limits mean unconstrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitControls {
    pub enable_rotate: bool,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub min_distance: Option<f64>,
    pub max_distance: Option<f64>,
    pub min_polar_angle: Option<f64>,
    pub max_polar_angle: Option<f64>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enable_rotate: true,
            enable_pan: true,
            enable_zoom: true,
            min_distance: None,
            max_distance: None,
            min_polar_angle: None,
            max_polar_angle: None,
        }
    }
}

/// Rendered/dropped counts for one element kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindStats {
    pub rendered: usize,
    pub dropped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneStats {
    pub walls: KindStats,
    pub doors: KindStats,
    pub windows: KindStats,
    pub furniture: KindStats,
}

impl SceneStats {
    pub fn get(&self, kind: ElementKind) -> KindStats {
        match kind {
            ElementKind::Wall => self.walls,
            ElementKind::Door => self.doors,
            ElementKind::Window => self.windows,
            ElementKind::Furniture => self.furniture,
        }
    }

    pub fn get_mut(&mut self, kind: ElementKind) -> &mut KindStats {
        match kind {
            ElementKind::Wall => &mut self.walls,
            ElementKind::Door => &mut self.doors,
            ElementKind::Window => &mut self.windows,
            ElementKind::Furniture => &mut self.furniture,
        }
    }

    pub fn total_rendered(&self) -> usize {
        ElementKind::ALL.iter().map(|k| self.get(*k).rendered).sum()
    }

    pub fn total_dropped(&self) -> usize {
        ElementKind::ALL.iter().map(|k| self.get(*k).dropped).sum()
    }
}

/// Complete scene handed to a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Shadow rendering enabled on the canvas
    pub shadows: bool,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub ambient_light: AmbientLight,
    pub directional_light: DirectionalLight,
    pub sky: Sky,
    pub environment: Environment,
    pub ground: GroundPlane,
    pub boxes: Vec<SceneBox>,
    pub stats: SceneStats,
}

impl Default for Scene {
    /// The fixed stage: camera, lights, sky and ground, with no elements
    fn default() -> Self {
        Self {
            shadows: true,
            camera: Camera::default(),
            controls: OrbitControls::default(),
            ambient_light: AmbientLight::default(),
            directional_light: DirectionalLight::default(),
            sky: Sky::default(),
            environment: Environment::default(),
            ground: GroundPlane::default(),
            boxes: Vec::new(),
            stats: SceneStats::default(),
        }
    }
}

/// A tessellated scene box
#[derive(Debug, Clone)]
pub struct ElementMesh<'a> {
    /// Index into [`Scene::boxes`]
    pub index: usize,
    pub element: &'a SceneBox,
    pub mesh: Mesh,
}

impl Scene {
    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    pub fn boxes_of(&self, kind: ElementKind) -> impl Iterator<Item = &SceneBox> {
        self.boxes.iter().filter(move |b| b.kind == kind)
    }

    /// Tessellate every box. Boxes with a zero extent have no surface and
    /// are skipped.
    pub fn element_meshes(&self) -> Vec<ElementMesh<'_>> {
        self.boxes
            .iter()
            .enumerate()
            .filter_map(|(index, element)| {
                element
                    .primitive()
                    .to_mesh()
                    .ok()
                    .map(|mesh| ElementMesh {
                        index,
                        element,
                        mesh,
                    })
            })
            .collect()
    }
}
