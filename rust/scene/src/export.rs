// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wavefront OBJ/MTL export
//!
//! Scene coordinates are already Y-up, so vertices are written unchanged.
//! Each box becomes its own object; materials are shared per element kind.

use crate::error::SceneError;
use crate::scene::Scene;
use crate::types::{ElementKind, Material};
use floorplan_geometry::Mesh;
use std::io::Write;

const GROUND_MATERIAL: &str = "ground";

fn material_name(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Wall => "wall",
        ElementKind::Door => "door",
        ElementKind::Window => "window",
        ElementKind::Furniture => "furniture",
    }
}

/// Write the scene as OBJ. When `mtl_library` is given, a `mtllib` line and
/// per-object `usemtl` lines reference it.
pub fn write_obj<W: Write>(
    scene: &Scene,
    out: &mut W,
    mtl_library: Option<&str>,
) -> Result<(), SceneError> {
    writeln!(out, "# Generated by floorplan-scene")?;
    writeln!(
        out,
        "# {} boxes ({} walls, {} doors, {} windows, {} furniture)",
        scene.box_count(),
        scene.stats.walls.rendered,
        scene.stats.doors.rendered,
        scene.stats.windows.rendered,
        scene.stats.furniture.rendered,
    )?;
    writeln!(out, "# Coordinate system: Y-up")?;
    if let Some(library) = mtl_library {
        writeln!(out, "mtllib {}", library)?;
    }
    writeln!(out)?;

    let mut vertex_offset: u32 = 0;

    let ground = scene.ground.to_mesh()?;
    write_object(out, "ground", GROUND_MATERIAL, &ground, mtl_library.is_some(), &mut vertex_offset)?;

    for element in scene.element_meshes() {
        let name = format!("{}_{}", material_name(element.element.kind), element.index);
        write_object(
            out,
            &name,
            material_name(element.element.kind),
            &element.mesh,
            mtl_library.is_some(),
            &mut vertex_offset,
        )?;
    }

    Ok(())
}

fn write_object<W: Write>(
    out: &mut W,
    name: &str,
    material: &str,
    mesh: &Mesh,
    with_material: bool,
    vertex_offset: &mut u32,
) -> Result<(), SceneError> {
    writeln!(out, "o {}", name)?;
    if with_material {
        writeln!(out, "usemtl {}", material)?;
    }

    for v in mesh.positions.chunks_exact(3) {
        writeln!(out, "v {:.6} {:.6} {:.6}", v[0], v[1], v[2])?;
    }
    for n in mesh.normals.chunks_exact(3) {
        writeln!(out, "vn {:.6} {:.6} {:.6}", n[0], n[1], n[2])?;
    }
    // OBJ indices are 1-based
    for t in mesh.indices.chunks_exact(3) {
        let i0 = t[0] + *vertex_offset + 1;
        let i1 = t[1] + *vertex_offset + 1;
        let i2 = t[2] + *vertex_offset + 1;
        writeln!(out, "f {}//{} {}//{} {}//{}", i0, i0, i1, i1, i2, i2)?;
    }

    *vertex_offset += mesh.vertex_count() as u32;
    writeln!(out)?;
    Ok(())
}

/// Write the material library referenced by [`write_obj`]
pub fn write_mtl<W: Write>(scene: &Scene, out: &mut W) -> Result<(), SceneError> {
    writeln!(out, "# Generated by floorplan-scene")?;
    writeln!(out)?;

    let ground = Material::new(scene.ground.color, 1.0, 0.0);
    write_material(out, GROUND_MATERIAL, &ground)?;
    for kind in ElementKind::ALL {
        write_material(out, material_name(kind), &kind.material())?;
    }
    Ok(())
}

fn write_material<W: Write>(out: &mut W, name: &str, material: &Material) -> Result<(), SceneError> {
    let [r, g, b, _] = material.color.to_rgba();
    writeln!(out, "newmtl {}", name)?;
    writeln!(out, "Kd {:.6} {:.6} {:.6}", r, g, b)?;
    writeln!(out, "Ka 0.000000 0.000000 0.000000")?;
    writeln!(out, "d 1.0")?;
    // PBR extension
    writeln!(out, "Pr {:.3}", material.roughness)?;
    writeln!(out, "Pm {:.3}", material.metalness)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::compose_scene;
    use crate::types::{FloorPlanData, FootprintRecord};

    fn sample_scene() -> Scene {
        let mut data = FloorPlanData::new();
        data.walls = vec![FootprintRecord::new(0.0, 0.0, 200.0, 20.0)];
        data.windows = vec![FootprintRecord::new(50.0, 0.0, 40.0, 10.0)];
        compose_scene(&data)
    }

    #[test]
    fn test_obj_structure() {
        let mut buf = Vec::new();
        write_obj(&sample_scene(), &mut buf, Some("scene.mtl")).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("mtllib scene.mtl"));
        assert!(text.contains("o ground"));
        assert!(text.contains("o wall_0"));
        assert!(text.contains("o window_1"));
        assert!(text.contains("usemtl window"));

        // Ground quad plus two boxes
        let vertices = text.lines().filter(|l| l.starts_with("v ")).count();
        let faces = text.lines().filter(|l| l.starts_with("f ")).count();
        assert_eq!(vertices, 4 + 24 * 2);
        assert_eq!(faces, 2 + 12 * 2);
    }

    #[test]
    fn test_obj_indices_in_range() {
        let mut buf = Vec::new();
        write_obj(&sample_scene(), &mut buf, None).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(!text.contains("usemtl"));

        let vertex_count = text.lines().filter(|l| l.starts_with("v ")).count() as u32;
        for line in text.lines().filter(|l| l.starts_with("f ")) {
            for corner in line.split_whitespace().skip(1) {
                let index: u32 = corner.split("//").next().unwrap().parse().unwrap();
                assert!(index >= 1 && index <= vertex_count);
            }
        }
    }

    #[test]
    fn test_mtl_lists_all_materials() {
        let mut buf = Vec::new();
        write_mtl(&sample_scene(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        for name in ["ground", "wall", "door", "window", "furniture"] {
            assert!(text.contains(&format!("newmtl {}\n", name)), "missing {}", name);
        }
    }
}
