// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single owner of the loaded floor plan.
//!
//! Every consumer reads records through this store; nothing else fetches
//! element documents. A refresh invalidates and re-requests all four
//! documents, then replaces the lists wholesale.

use super::assets::{load_floor_plan, AssetSource};
use floorplan_scene::{compose_scene, FloorPlanData, Scene};
use serde::Serialize;
use tokio::sync::RwLock;

/// Point-in-time view of the store.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// At least one refresh is still in flight (or none has run yet).
    pub loading: bool,
    /// Number of refreshes applied so far.
    pub generation: u64,
    pub data: FloorPlanData,
}

impl Snapshot {
    pub fn scene(&self) -> Scene {
        compose_scene(&self.data)
    }
}

#[derive(Debug, Default)]
struct StoreState {
    data: FloorPlanData,
    generation: u64,
    /// Refreshes started but not yet settled
    pending: usize,
    /// Ticket handed to the most recently started refresh
    issued: u64,
    /// Ticket of the refresh whose data is currently held
    applied: u64,
}

#[derive(Debug, Default)]
pub struct SceneStore {
    state: RwLock<StoreState>,
}

impl SceneStore {
    /// An empty store, loading until its first refresh settles.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> Snapshot {
        let state = self.state.read().await;
        Snapshot {
            loading: state.pending > 0 || state.generation == 0,
            generation: state.generation,
            data: state.data.clone(),
        }
    }

    /// Re-request all four documents and replace the held data.
    ///
    /// When refreshes overlap, data from an older refresh never replaces
    /// data from a newer one.
    pub async fn refresh<S: AssetSource>(&self, source: &S) -> Snapshot {
        let ticket = {
            let mut state = self.state.write().await;
            state.pending += 1;
            state.issued += 1;
            state.issued
        };

        tracing::debug!(ticket, "Refreshing floor plan");
        let data = load_floor_plan(source).await;

        {
            let mut state = self.state.write().await;
            state.pending -= 1;
            if ticket > state.applied {
                state.applied = ticket;
                state.data = data;
                state.generation += 1;
                tracing::info!(
                    generation = state.generation,
                    walls = state.data.walls.len(),
                    doors = state.data.doors.len(),
                    windows = state.data.windows.len(),
                    furniture = state.data.furniture.len(),
                    "Floor plan loaded"
                );
            } else {
                tracing::debug!(ticket, applied = state.applied, "Discarding stale refresh");
            }
        }

        self.snapshot().await
    }
}
