// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Errors raised while decoding element documents or exporting scenes
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid element document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Geometry error: {0}")]
    Geometry(#[from] floorplan_geometry::Error),

    #[error("Export failed: {0}")]
    Io(#[from] std::io::Error),
}
