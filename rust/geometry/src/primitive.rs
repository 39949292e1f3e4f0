// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Box and plane tessellation
//!
//! Boxes are built around the origin with flat per-face normals (4 vertices
//! per face, so 24 vertices and 12 triangles per box), then placed with a
//! rotation about +Y and a translation.

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::transform::{apply_transform, placement_matrix};
use nalgebra::{Point3, Vector3};

/// Face frames as (normal, u, v) with `u × v = normal`, so corners walked
/// in (-u-v, +u-v, +u+v, -u+v) order are counter-clockwise from outside.
const BOX_FACES: [([f64; 3], [f64; 3], [f64; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
];

const CORNER_SIGNS: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

/// An axis-aligned box placed in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxPrimitive {
    /// Box center
    pub center: Point3<f64>,
    /// Full extents along local X, Y (up) and Z before rotation
    pub size: Vector3<f64>,
    /// Rotation about +Y in radians
    pub rotation_y: f64,
}

impl BoxPrimitive {
    pub fn new(center: Point3<f64>, size: Vector3<f64>, rotation_y: f64) -> Self {
        Self {
            center,
            size,
            rotation_y,
        }
    }

    /// Tessellate into a placed triangle mesh
    pub fn to_mesh(&self) -> Result<Mesh> {
        if !self.center.coords.iter().all(|c| c.is_finite()) || !self.rotation_y.is_finite() {
            return Err(Error::InvalidDimensions(format!(
                "non-finite placement {:?} / {}",
                self.center, self.rotation_y
            )));
        }
        let mut mesh = box_mesh(self.size)?;
        apply_transform(&mut mesh, &placement_matrix(self.center, self.rotation_y));
        Ok(mesh)
    }
}

/// Build a box of the given full extents centered on the origin
pub fn box_mesh(size: Vector3<f64>) -> Result<Mesh> {
    if size.iter().any(|s| !s.is_finite() || *s <= 0.0) {
        return Err(Error::InvalidDimensions(format!(
            "box extents must be positive and finite, got [{}, {}, {}]",
            size.x, size.y, size.z
        )));
    }

    let half = size / 2.0;
    let mut mesh = Mesh::with_capacity(24, 36);

    for (normal, u, v) in BOX_FACES {
        let normal = Vector3::from(normal);
        let u = Vector3::from(u);
        let v = Vector3::from(v);
        let base = mesh.vertex_count() as u32;

        for (su, sv) in CORNER_SIGNS {
            let corner = (normal + u * su + v * sv).component_mul(&half);
            mesh.add_vertex(Point3::from(corner), normal);
        }

        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }

    Ok(mesh)
}

/// Build a horizontal quad at y = 0 facing +Y, spanning `width` along X and
/// `depth` along Z
pub fn plane_mesh(width: f64, depth: f64) -> Result<Mesh> {
    if !(width.is_finite() && depth.is_finite()) || width <= 0.0 || depth <= 0.0 {
        return Err(Error::InvalidDimensions(format!(
            "plane extents must be positive and finite, got {} x {}",
            width, depth
        )));
    }

    let half_w = width / 2.0;
    let half_d = depth / 2.0;
    let up = Vector3::y();

    let mut mesh = Mesh::with_capacity(4, 6);
    mesh.add_vertex(Point3::new(-half_w, 0.0, half_d), up);
    mesh.add_vertex(Point3::new(half_w, 0.0, half_d), up);
    mesh.add_vertex(Point3::new(half_w, 0.0, -half_d), up);
    mesh.add_vertex(Point3::new(-half_w, 0.0, -half_d), up);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);

    Ok(mesh)
}
