// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement transforms for primitives

use crate::mesh::Mesh;
use nalgebra::{Matrix4, Point3, Vector3};

/// Build a placement matrix: rotate about +Y by `rotation_y` radians, then
/// translate to `center`.
#[inline]
pub fn placement_matrix(center: Point3<f64>, rotation_y: f64) -> Matrix4<f64> {
    let translation = Matrix4::new_translation(&center.coords);
    let rotation = Matrix4::from_axis_angle(&Vector3::y_axis(), rotation_y);
    translation * rotation
}

/// Apply transformation matrix to mesh
#[inline]
pub fn apply_transform(mesh: &mut Mesh, transform: &Matrix4<f64>) {
    mesh.positions.chunks_exact_mut(3).for_each(|chunk| {
        let point = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = transform.transform_point(&point);
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });

    // Normals need the inverse transpose
    let normal_matrix = transform.try_inverse().unwrap_or(*transform).transpose();

    mesh.normals.chunks_exact_mut(3).for_each(|chunk| {
        let normal = Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = (normal_matrix * normal.to_homogeneous()).xyz().normalize();
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_placement_translates() {
        let m = placement_matrix(Point3::new(10.0, 5.0, -3.0), 0.0);
        let p = m.transform_point(&Point3::origin());
        assert_relative_eq!(p, Point3::new(10.0, 5.0, -3.0));
    }

    #[test]
    fn test_quarter_turn_maps_x_to_negative_z() {
        let m = placement_matrix(Point3::origin(), FRAC_PI_2);
        let p = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_apply_transform_rotates_normals() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::x());
        apply_transform(&mut mesh, &placement_matrix(Point3::new(0.0, 2.0, 0.0), FRAC_PI_2));

        assert_relative_eq!(mesh.positions[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(mesh.positions[1], 2.0, epsilon = 1e-6);
        assert_relative_eq!(mesh.positions[2], -1.0, epsilon = 1e-6);
        assert_relative_eq!(mesh.normals[2], -1.0, epsilon = 1e-6);
    }
}
