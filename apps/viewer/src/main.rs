// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor Plan Viewer - upload floor plans for detection and view them in 3D.
//!
//! The detection backend receives an image and updates four element
//! documents (walls, doors, windows, furniture). This binary loads those
//! documents, maps every record to a box and serves the composed scene.
//!
//! # Commands
//!
//! - `serve` - Run the HTTP API (loads data on start)
//! - `upload <IMAGE>` - Upload a PNG/JPEG, then reload and summarize
//! - `export` - Write the composed scene as OBJ/MTL or JSON
//!
//! # Endpoints
//!
//! - `GET /api/v1/health` - Health check
//! - `GET /api/v1/floorplan` - Loaded records
//! - `GET /api/v1/scene` - Composed scene with meshes
//! - `POST /api/v1/refresh` - Re-request all element documents
//! - `POST /api/v1/upload` - Upload an image for detection

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use floorplan_scene::{write_mtl, write_obj, ElementKind};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

mod config;
mod error;
mod routes;
mod services;
#[cfg(test)]
mod test_support;
mod types;

use config::Config;
use services::{
    pick_image, ConsoleNotifier, HttpAssetSource, HttpUploadTransport, SceneStore, UploadOutcome,
    Uploader,
};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<SceneStore>,
    pub assets: Arc<HttpAssetSource>,
    pub uploader: Arc<Uploader<HttpUploadTransport>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: Arc::new(SceneStore::new()),
            assets: Arc::new(HttpAssetSource::new(&config.assets_url)),
            uploader: Arc::new(Uploader::new(HttpUploadTransport::new(&config.upload_url))),
            config: Arc::new(config),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "floorplan-viewer",
    version,
    about = "Upload floor plans for detection and view the result in 3D"
)]
struct Cli {
    /// Detection backend endpoint
    #[arg(long, env = "UPLOAD_URL")]
    upload_url: Option<String>,

    /// Base URL of the element documents
    #[arg(long, env = "ASSETS_URL")]
    assets_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },
    /// Upload a floor plan image for detection
    Upload { image: PathBuf },
    /// Write the composed scene to a file
    Export {
        /// Defaults to `scene.obj` or `scene.json` per format
        #[arg(long, short)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ExportFormat::Obj)]
        format: ExportFormat,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Obj,
    Json,
}

impl ExportFormat {
    fn default_output(self) -> PathBuf {
        match self {
            ExportFormat::Obj => PathBuf::from("scene.obj"),
            ExportFormat::Json => PathBuf::from("scene.json"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tower_http=debug,floorplan_viewer=debug".into()),
        )
        .pretty()
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = cli.upload_url {
        config.upload_url = url;
    }
    if let Some(url) = cli.assets_url {
        config.assets_url = url.trim_end_matches('/').to_string();
    }

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Upload { image } => upload(config, &image).await,
        Command::Export { output, format } => {
            let output = output.unwrap_or_else(|| format.default_output());
            export(config, &output, format).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        port = config.port,
        upload_url = %config.upload_url,
        assets_url = %config.assets_url,
        max_file_size_mb = config.max_file_size_mb,
        "Starting Floor Plan Viewer"
    );

    let state = AppState::new(config);

    // Initial load runs in the background; requests see `loading` until it settles
    {
        let store = state.store.clone();
        let assets = state.assets.clone();
        tokio::spawn(async move {
            store.refresh(assets.as_ref()).await;
        });
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = routes::app(state);
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

async fn upload(config: Config, image: &Path) -> anyhow::Result<ExitCode> {
    let file = pick_image(image).await?;
    let state = AppState::new(config);

    let mut reload = false;
    let outcome = state
        .uploader
        .upload(Some(&file), &ConsoleNotifier, || reload = true)
        .await;

    if outcome != UploadOutcome::Succeeded {
        return Ok(ExitCode::FAILURE);
    }

    if reload {
        let snapshot = state.store.refresh(state.assets.as_ref()).await;
        let scene = snapshot.scene();
        for kind in ElementKind::ALL {
            let stats = scene.stats.get(kind);
            println!(
                "{:<10} {:>5} rendered {:>5} skipped",
                kind.label(),
                stats.rendered,
                stats.dropped
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn export(config: Config, output: &Path, format: ExportFormat) -> anyhow::Result<()> {
    let state = AppState::new(config);
    let snapshot = state.store.refresh(state.assets.as_ref()).await;
    let scene = snapshot.scene();

    let file = File::create(output).with_context(|| format!("failed to create {}", output.display()))?;
    let mut out = BufWriter::new(file);

    match format {
        ExportFormat::Obj => {
            let mtl_path = output.with_extension("mtl");
            let mtl_name = mtl_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "scene.mtl".to_string());

            write_obj(&scene, &mut out, Some(&mtl_name))?;

            let mtl_file = File::create(&mtl_path)
                .with_context(|| format!("failed to create {}", mtl_path.display()))?;
            let mut mtl_out = BufWriter::new(mtl_file);
            write_mtl(&scene, &mut mtl_out)?;
            mtl_out.flush()?;
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &scene)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    tracing::info!(
        output = %output.display(),
        boxes = scene.box_count(),
        dropped = scene.stats.total_dropped(),
        "Scene exported"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_commands() {
        let cli = Cli::parse_from(["floorplan-viewer", "upload", "plan.png"]);
        assert!(matches!(cli.command, Command::Upload { ref image } if image == Path::new("plan.png")));

        let cli = Cli::parse_from([
            "floorplan-viewer",
            "--assets-url",
            "http://example.test/assets",
            "export",
            "--format",
            "json",
        ]);
        assert_eq!(cli.assets_url.as_deref(), Some("http://example.test/assets"));
        match cli.command {
            Command::Export { output, format } => {
                assert_eq!(output, None);
                assert_eq!(format, ExportFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn export_default_output_follows_format() {
        let output_for = |args: &[&str]| match Cli::parse_from(args).command {
            Command::Export { output, format } => {
                output.unwrap_or_else(|| format.default_output())
            }
            other => panic!("unexpected command: {:?}", other),
        };

        assert_eq!(
            output_for(&["floorplan-viewer", "export"]),
            PathBuf::from("scene.obj")
        );
        assert_eq!(
            output_for(&["floorplan-viewer", "export", "--format", "json"]),
            PathBuf::from("scene.json")
        );
        assert_eq!(
            output_for(&["floorplan-viewer", "export", "--format", "json", "-o", "plan.txt"]),
            PathBuf::from("plan.txt")
        );
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
