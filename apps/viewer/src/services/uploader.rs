// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan image uploads to the detection backend.

use super::notify::{Notice, Notifier};
use bytes::Bytes;
use image::ImageFormat;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Serialize;
use std::future::Future;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// An image selected for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Upload request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Detection backend returned {0}")]
    Status(StatusCode),
}

#[derive(Debug, Error)]
pub enum PickError {
    #[error("Only PNG and JPEG images can be uploaded: {0}")]
    UnsupportedFormat(String),

    #[error("Cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Select a local image the way the browser picker does: PNG or JPEG only,
/// judged by extension.
pub async fn pick_image(path: &Path) -> Result<UploadFile, PickError> {
    let format = ImageFormat::from_path(path)
        .ok()
        .filter(|f| matches!(f, ImageFormat::Png | ImageFormat::Jpeg))
        .ok_or_else(|| PickError::UnsupportedFormat(path.display().to_string()))?;

    let bytes = tokio::fs::read(path).await.map_err(|source| PickError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "floorplan".to_string());

    Ok(UploadFile::new(file_name, format.to_mime_type(), Bytes::from(bytes)))
}

/// Delivers an upload to the detection backend.
pub trait UploadTransport: Send + Sync {
    /// Ok only for a 2xx response. The response body is not read.
    fn send(&self, file: &UploadFile) -> impl Future<Output = Result<(), UploadError>> + Send;
}

/// Posts the image as `multipart/form-data` to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpUploadTransport {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpUploadTransport {
    /// No timeout is configured; a request runs until it settles.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            http: reqwest::Client::new(),
        }
    }
}

impl UploadTransport for HttpUploadTransport {
    async fn send(&self, file: &UploadFile) -> Result<(), UploadError> {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new().part(FILE_FIELD, part);

        let resp = self.http.post(&self.endpoint).multipart(form).send().await?;

        if !resp.status().is_success() {
            return Err(UploadError::Status(resp.status()));
        }
        Ok(())
    }
}

/// How a trigger settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadOutcome {
    /// No file selected; nothing happened.
    Skipped,
    /// Another upload was in flight; nothing happened.
    Busy,
    Succeeded,
    Failed,
}

/// Clears the busy flag on every exit path.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Single-flight uploader.
///
/// At most one upload runs at a time. Success invokes the caller's callback
/// once and posts one success notice; failure posts one failure notice and
/// never retries.
pub struct Uploader<T> {
    transport: T,
    busy: AtomicBool,
}

impl<T: UploadTransport> Uploader<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            busy: AtomicBool::new(false),
        }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub async fn upload<N, F>(
        &self,
        selection: Option<&UploadFile>,
        notifier: &N,
        on_success: F,
    ) -> UploadOutcome
    where
        N: Notifier + ?Sized,
        F: FnOnce() + Send,
    {
        let Some(file) = selection else {
            tracing::debug!("Upload triggered without a selected file");
            return UploadOutcome::Skipped;
        };

        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            tracing::warn!(file_name = %file.file_name, "Upload already in progress");
            return UploadOutcome::Busy;
        };

        tracing::info!(
            file_name = %file.file_name,
            content_type = %file.content_type,
            size = file.bytes.len(),
            "Uploading floor plan"
        );

        match self.transport.send(file).await {
            Ok(()) => {
                tracing::info!(file_name = %file.file_name, "Detection complete");
                on_success();
                notifier.notify(Notice::upload_succeeded());
                UploadOutcome::Succeeded
            }
            Err(e) => {
                tracing::error!(file_name = %file.file_name, error = %e, "Upload failed");
                notifier.notify(Notice::upload_failed());
                UploadOutcome::Failed
            }
        }
    }
}
