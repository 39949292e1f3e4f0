// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan scene composition
//!
//! This crate turns the output of a floor plan detection service into a 3D
//! scene:
//! 1. Decoding the four element documents (walls, doors, windows, furniture)
//! 2. Mapping each footprint record to a positioned box
//! 3. Describing the stage (ground, lights, sky, orbit camera)
//! 4. Exporting tessellated geometry as OBJ/MTL
//!
//! # Usage
//!
//! ```rust,ignore
//! use floorplan_scene::{compose_scene, parse_records, ElementKind, FloorPlanData};
//!
//! let mut data = FloorPlanData::new();
//! data.set(ElementKind::Wall, parse_records(&walls_json)?);
//!
//! let scene = compose_scene(&data);
//! for element in scene.element_meshes() {
//!     // hand element.mesh and element.element.material to a renderer
//! }
//! ```

pub mod composer;
pub mod error;
pub mod export;
pub mod scene;
pub mod types;

pub use composer::{compose_scene, element_box, structure_box, wall_box, MIN_WALL_THICKNESS};
pub use error::SceneError;
pub use export::{write_mtl, write_obj};
pub use scene::{
    AmbientLight, Camera, DirectionalLight, ElementMesh, Environment, GroundPlane, KindStats,
    OrbitControls, Scene, SceneBox, SceneStats, Sky,
};
pub use types::{
    parse_records, Color, ElementKind, FloorPlanData, FootprintRecord, Material,
    STRUCTURE_HEIGHT, WALL_HEIGHT,
};
