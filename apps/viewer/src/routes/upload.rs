// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Upload endpoint.

use crate::error::ApiError;
use crate::services::{NoticeLog, UploadFile, UploadOutcome, FILE_FIELD};
use crate::types::UploadResponse;
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};
use image::ImageFormat;

/// Guess a content type from the file name when the part carries none.
fn guess_content_type(file_name: &str) -> &'static str {
    ImageFormat::from_path(file_name)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

/// Extract the `file` field from multipart form data.
async fn extract_file(multipart: &mut Multipart) -> Result<Option<UploadFile>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        tracing::debug!(field_name = %field_name, "Processing multipart field");

        if field_name == FILE_FIELD {
            let file_name = field.file_name().unwrap_or("floorplan").to_string();
            let content_type = field
                .content_type()
                .map(str::to_string)
                .unwrap_or_else(|| guess_content_type(&file_name).to_string());
            let bytes = field.bytes().await?;
            tracing::debug!(size = bytes.len(), "Extracted file from multipart");
            return Ok(Some(UploadFile::new(file_name, content_type, bytes)));
        }
    }

    Ok(None)
}

/// POST /api/v1/upload - Forward an image to the detection backend.
///
/// On success the store is refreshed before responding.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let file = extract_file(&mut multipart).await?.ok_or(ApiError::MissingFile)?;

    let notices = NoticeLog::new();
    let mut reload = false;
    let outcome = state
        .uploader
        .upload(Some(&file), &notices, || reload = true)
        .await;

    match outcome {
        UploadOutcome::Succeeded => {
            let generation = if reload {
                Some(state.store.refresh(state.assets.as_ref()).await.generation)
            } else {
                None
            };
            Ok(Json(UploadResponse {
                outcome,
                notices: notices.take(),
                generation,
            }))
        }
        UploadOutcome::Busy => Err(ApiError::UploadBusy),
        UploadOutcome::Failed => Err(ApiError::UploadFailed(notices.take())),
        UploadOutcome::Skipped => Err(ApiError::MissingFile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::app;
    use crate::test_support::{spawn_server, test_state};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use tower::ServiceExt;

    const BOUNDARY: &str = "floorplan-test-boundary";

    fn multipart_request(field: &str, file_name: &str, content: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

        Request::post("/api/v1/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn error_code(resp: axum::response::Response) -> String {
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        json["code"].as_str().unwrap().to_string()
    }

    #[test]
    fn content_type_guess() {
        assert_eq!(guess_content_type("Plan.PNG"), "image/png");
        assert_eq!(guess_content_type("plan.jpeg"), "image/jpeg");
        assert_eq!(guess_content_type("plan"), "application/octet-stream");
    }

    #[tokio::test]
    async fn missing_file_is_rejected() {
        let app = app(test_state("http://127.0.0.1:9/assets", "http://127.0.0.1:9/upload"));
        let resp = app
            .oneshot(multipart_request("image", "plan.png", b"png"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(resp).await, "MISSING_FILE");
    }

    #[tokio::test]
    async fn success_refreshes_store() {
        let backend = Router::new()
            .route("/upload", post(|| async { "ok" }))
            .route(
                "/assets/walls.json",
                get(|| async { r#"[{"x": 0, "y": 0, "width": 120, "height": 12}]"# }),
            );
        let base = spawn_server(backend).await;
        let state = test_state(&format!("{}/assets", base), &format!("{}/upload", base));
        let store = state.store.clone();

        let resp = app(state)
            .oneshot(multipart_request("file", "plan.png", b"\x89PNG"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["outcome"], "succeeded");
        assert_eq!(json["generation"], 1);
        assert_eq!(json["notices"].as_array().unwrap().len(), 1);
        assert_eq!(json["notices"][0]["level"], "success");

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.data.walls.len(), 1);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn backend_failure_is_bad_gateway() {
        let backend = Router::new().route(
            "/upload",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "detector crashed") }),
        );
        let base = spawn_server(backend).await;
        let state = test_state(&format!("{}/assets", base), &format!("{}/upload", base));
        let store = state.store.clone();

        let resp = app(state)
            .oneshot(multipart_request("file", "plan.png", b"\x89PNG"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "UPLOAD_FAILED");
        assert_eq!(json["notices"].as_array().unwrap().len(), 1);
        assert_eq!(json["notices"][0]["level"], "failure");
        assert_eq!(store.snapshot().await.generation, 0);
    }
}
