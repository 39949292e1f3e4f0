// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element document loading.
//!
//! The four documents are requested concurrently. Each request settles on
//! its own: a failure is logged and leaves that kind empty without
//! affecting the others.

use floorplan_scene::{parse_records, ElementKind, FloorPlanData, FootprintRecord, SceneError};
use reqwest::StatusCode;
use std::future::Future;
use thiserror::Error;

/// Failure to load one element document.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("{kind} request failed: {source}")]
    Transport {
        kind: ElementKind,
        #[source]
        source: reqwest::Error,
    },

    #[error("{kind} fetch failed with status {status}")]
    Status { kind: ElementKind, status: StatusCode },

    #[error("{kind} document is invalid: {source}")]
    Decode {
        kind: ElementKind,
        #[source]
        source: SceneError,
    },
}

/// Source of element documents.
pub trait AssetSource: Send + Sync {
    /// Fetch and decode the document for one kind.
    fn fetch(
        &self,
        kind: ElementKind,
    ) -> impl Future<Output = Result<Vec<FootprintRecord>, AssetError>> + Send;
}

/// Fetches `{base_url}/{kind}.json` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAssetSource {
    base_url: String,
    http: reqwest::Client,
}

impl HttpAssetSource {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn document_url(&self, kind: ElementKind) -> String {
        format!("{}/{}.json", self.base_url, kind.asset_name())
    }
}

impl AssetSource for HttpAssetSource {
    async fn fetch(&self, kind: ElementKind) -> Result<Vec<FootprintRecord>, AssetError> {
        let url = self.document_url(kind);
        tracing::debug!(kind = %kind, url = %url, "Fetching element document");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| AssetError::Transport { kind, source })?;

        if !resp.status().is_success() {
            return Err(AssetError::Status {
                kind,
                status: resp.status(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|source| AssetError::Transport { kind, source })?;

        parse_records(&body).map_err(|source| AssetError::Decode { kind, source })
    }
}

async fn fetch_or_empty<S: AssetSource>(source: &S, kind: ElementKind) -> Vec<FootprintRecord> {
    match source.fetch(kind).await {
        Ok(records) => {
            tracing::debug!(kind = %kind, count = records.len(), "Loaded element document");
            records
        }
        Err(e) => {
            tracing::error!(kind = %kind, error = %e, "Error loading element document");
            Vec::new()
        }
    }
}

/// Load all four documents concurrently. Never fails: a kind whose
/// document could not be loaded is left empty.
pub async fn load_floor_plan<S: AssetSource>(source: &S) -> FloorPlanData {
    let (walls, doors, windows, furniture) = tokio::join!(
        fetch_or_empty(source, ElementKind::Wall),
        fetch_or_empty(source, ElementKind::Door),
        fetch_or_empty(source, ElementKind::Window),
        fetch_or_empty(source, ElementKind::Furniture),
    );

    FloorPlanData {
        walls,
        doors,
        windows,
        furniture,
    }
}
