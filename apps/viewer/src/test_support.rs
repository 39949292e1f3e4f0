// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory asset sources, upload transports and a loopback server for tests.

use crate::config::Config;
use crate::services::assets::{AssetError, AssetSource};
use crate::services::uploader::{UploadError, UploadFile, UploadTransport};
use crate::AppState;
use axum::Router;
use bytes::Bytes;
use floorplan_scene::{ElementKind, FootprintRecord};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Serve `router` on an ephemeral loopback port; returns `http://addr`.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Default configuration pointed at the given backend URLs.
pub fn test_config(assets_url: &str, upload_url: &str) -> Config {
    let assets_url = assets_url.to_string();
    let upload_url = upload_url.to_string();
    Config::from_lookup(|key| match key {
        "ASSETS_URL" => Some(assets_url.clone()),
        "UPLOAD_URL" => Some(upload_url.clone()),
        _ => None,
    })
}

/// Fresh application state with an empty store.
pub fn test_state(assets_url: &str, upload_url: &str) -> AppState {
    AppState::new(test_config(assets_url, upload_url))
}

pub fn png_file() -> UploadFile {
    UploadFile::new("plan.png", "image/png", Bytes::from_static(b"\x89PNG\r\n\x1a\nfake"))
}

/// Serves whatever documents it holds; missing kinds fail with 404.
#[derive(Default)]
pub struct FakeAssets {
    documents: Mutex<HashMap<ElementKind, Vec<FootprintRecord>>>,
    delays: HashMap<ElementKind, Duration>,
    calls: AtomicUsize,
}

impl FakeAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, kind: ElementKind, records: Vec<FootprintRecord>) -> Self {
        self.set(kind, records);
        self
    }

    pub fn with_delay(mut self, kind: ElementKind, delay: Duration) -> Self {
        self.delays.insert(kind, delay);
        self
    }

    pub fn set(&self, kind: ElementKind, records: Vec<FootprintRecord>) {
        self.documents.lock().unwrap().insert(kind, records);
    }

    pub fn remove(&self, kind: ElementKind) {
        self.documents.lock().unwrap().remove(&kind);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AssetSource for FakeAssets {
    async fn fetch(&self, kind: ElementKind) -> Result<Vec<FootprintRecord>, AssetError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&kind) {
            tokio::time::sleep(*delay).await;
        }
        let document = self.documents.lock().unwrap().get(&kind).cloned();
        document.ok_or(AssetError::Status {
            kind,
            status: StatusCode::NOT_FOUND,
        })
    }
}

/// Upload transport answering with a fixed status, optionally held open
/// until released.
pub struct FakeTransport {
    status: StatusCode,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
}

impl FakeTransport {
    pub fn succeeding() -> Self {
        Self::with_status(StatusCode::OK)
    }

    pub fn failing() -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn with_status(status: StatusCode) -> Self {
        Self {
            status,
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Hold each request until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl UploadTransport for FakeTransport {
    async fn send(&self, _file: &UploadFile) -> Result<(), UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.status.is_success() {
            Ok(())
        } else {
            Err(UploadError::Status(self.status))
        }
    }
}
