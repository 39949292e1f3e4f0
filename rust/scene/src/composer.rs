// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 3D scene composition from detected floor plan elements

use crate::scene::{Scene, SceneBox};
use crate::types::{ElementKind, FloorPlanData, FootprintRecord};
use std::f64::consts::FRAC_PI_2;

/// Walls are never thinner than this
pub const MIN_WALL_THICKNESS: f64 = 1.0;

/// Compose the full scene: the fixed stage plus one box per valid record.
///
/// Boxes come out in kind order (walls, doors, windows, furniture) and in
/// record order within a kind. Invalid records are counted as dropped.
pub fn compose_scene(data: &FloorPlanData) -> Scene {
    let mut scene = Scene::default();
    scene.boxes.reserve(data.total_records());

    for kind in ElementKind::ALL {
        for record in data.records(kind) {
            match element_box(record, kind) {
                Some(element) => {
                    scene.boxes.push(element);
                    scene.stats.get_mut(kind).rendered += 1;
                }
                None => scene.stats.get_mut(kind).dropped += 1,
            }
        }
    }

    scene
}

/// Map one record of the given kind to its box
pub fn element_box(record: &FootprintRecord, kind: ElementKind) -> Option<SceneBox> {
    match kind {
        ElementKind::Wall => wall_box(record),
        _ => structure_box(record, kind),
    }
}

/// Wall footprint to box.
///
/// The longer footprint extent is the run length and the shorter the
/// thickness. A wall wider than tall runs along X; otherwise it is turned a
/// quarter turn about the vertical axis. Height is fixed.
pub fn wall_box(record: &FootprintRecord) -> Option<SceneBox> {
    if !record.is_valid() {
        return None;
    }

    let length = record.width.max(record.height);
    let mut thickness = record.width.min(record.height);
    if thickness == 0.0 {
        thickness = MIN_WALL_THICKNESS;
    }
    let rotation_y = if record.width > record.height {
        0.0
    } else {
        FRAC_PI_2
    };

    Some(placed_box(
        ElementKind::Wall,
        record,
        [length, ElementKind::Wall.vertical_extent(), thickness],
        rotation_y,
    ))
}

/// Door, window or furniture footprint to an axis-aligned box
pub fn structure_box(record: &FootprintRecord, kind: ElementKind) -> Option<SceneBox> {
    if !record.is_valid() {
        return None;
    }

    Some(placed_box(
        kind,
        record,
        [record.width, kind.vertical_extent(), record.height],
        0.0,
    ))
}

fn placed_box(
    kind: ElementKind,
    record: &FootprintRecord,
    size: [f64; 3],
    rotation_y: f64,
) -> SceneBox {
    SceneBox {
        kind,
        // Rest on the ground plane
        position: [record.x, size[1] / 2.0, record.y],
        size,
        rotation_y,
        material: kind.material(),
        cast_shadow: true,
        receive_shadow: true,
    }
}
