// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewer configuration loaded from environment variables.

/// Viewer configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP API listens on.
    pub port: u16,
    /// Detection backend endpoint receiving multipart uploads.
    pub upload_url: String,
    /// Base URL of the element documents (`{assets_url}/walls.json`, ...).
    pub assets_url: String,
    /// Maximum request body accepted by the HTTP API, in MB.
    pub max_file_size_mb: usize,
    /// Allowed CORS origins (comma-separated, or "*" for all).
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            upload_url: lookup("UPLOAD_URL")
                .unwrap_or_else(|| "http://localhost:8000/upload".into()),
            assets_url: lookup("ASSETS_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "http://localhost:3000/assets".into()),
            max_file_size_mb: lookup("MAX_FILE_SIZE_MB")
                .and_then(|v| v.parse().ok())
                .unwrap_or(25),
            cors_origins: lookup("CORS_ORIGINS")
                .unwrap_or_else(|| "http://localhost:3000,http://127.0.0.1:3000".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
