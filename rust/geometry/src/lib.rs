// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor Plan Geometry
//!
//! Triangle meshes and primitive tessellation for floor plan scenes.
//! Everything here is Y-up: footprints live in the X-Z plane and boxes are
//! extruded along +Y.

pub mod error;
pub mod mesh;
pub mod primitive;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};

pub use error::{Error, Result};
pub use mesh::Mesh;
pub use primitive::{box_mesh, plane_mesh, BoxPrimitive};
pub use transform::{apply_transform, placement_matrix};
