mod handlers;
mod upload;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::limit::RequestBodyLimitLayer;
use wordlight_core::report::ProcessOptions;

use crate::config::ProcessArgs;
use crate::prelude::*;
use crate::workspace::Uploads;

#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// Port to listen on
    #[arg(short, long, env = "WORDLIGHT_PORT", default_value = "5000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "WORDLIGHT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Directory holding uploads and generated HTML files
    #[arg(long, env = "WORDLIGHT_UPLOADS_DIR", default_value = "uploads")]
    pub uploads_dir: PathBuf,

    /// Maximum request body size in megabytes
    #[arg(long, env = "WORDLIGHT_MAX_UPLOAD_MB", default_value = "50")]
    pub max_upload_mb: usize,

    #[clap(flatten)]
    pub process: ProcessArgs,
}

/// State shared by all handlers.
#[derive(Debug)]
pub struct AppState {
    pub uploads: Arc<Uploads>,
    pub options: ProcessOptions,
    pub trim_words: bool,
}

pub fn router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::upload))
        .route("/download_html", get(handlers::download_html))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}

pub async fn run(options: ServeOptions, _global: crate::Global) -> Result<()> {
    let state = Arc::new(AppState {
        uploads: Arc::new(Uploads::new(&options.uploads_dir)),
        options: options.process.process_options(),
        trim_words: options.process.trim_words,
    });

    let addr = format!("{}:{}", options.host, options.port);
    let app_router = router(state, options.max_upload_mb.saturating_mul(1024 * 1024));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Listening on http://{addr}");
    log::info!("Uploads directory: {}", options.uploads_dir.display());

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}
