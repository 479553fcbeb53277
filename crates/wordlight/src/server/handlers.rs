use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use wordlight_core::matcher::parse_word_list;
use wordlight_core::page::{download_url, render_index, ResultView};
use wordlight_core::report::{highlighted_file_name, WordOccurrenceResult};

use super::upload::{UploadForm, ValidUpload};
use super::AppState;
use crate::prelude::*;

pub const NOT_FOUND_BODY: &str = "HTML File not found.";

async fn run_blocking<T, F>(f: F) -> Result<T, Error>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, Error> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Internal(format!("Task join error: {e}")))?
}

/// Handler: GET /
pub async fn index() -> Html<String> {
    Html(render_index(None, &[]))
}

/// Handler: POST /
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Html<String>, Error> {
    let uploads = Arc::clone(&state.uploads);
    run_blocking(move || Ok(uploads.purge_inactive())).await?;

    let form = UploadForm::read(multipart).await?;
    let upload = match form.validate() {
        Ok(upload) => upload,
        Err(message) => {
            log::info!("Rejected upload: {message}");
            return Ok(Html(render_index(Some(message), &[])));
        }
    };

    log::info!(
        "Received {} with word list {}",
        upload.pdf_file.file_name,
        upload.highlight_file.file_name
    );

    let processed = run_blocking(move || process_upload(&state, upload)).await?;

    let views: Vec<ResultView<'_>> = processed
        .results
        .iter()
        .map(|(result, path)| ResultView {
            result,
            html_path: path.display().to_string(),
            download_url: download_url(&processed.session_id, &result.file_name),
        })
        .collect();

    Ok(Html(render_index(None, &views)))
}

struct Processed {
    session_id: String,
    results: Vec<(WordOccurrenceResult, PathBuf)>,
}

fn process_upload(state: &AppState, upload: ValidUpload) -> Result<Processed, Error> {
    let guard = state.uploads.open_session()?;
    let session = guard.session();

    session.save(&upload.pdf_file.file_name, &upload.pdf_file.bytes)?;
    session.save(&upload.highlight_file.file_name, &upload.highlight_file.bytes)?;

    let raw_words = String::from_utf8_lossy(&upload.highlight_file.bytes);
    let words = parse_word_list(&raw_words, state.trim_words);

    let results = crate::batch::process_directory(&session.dir, &words, &state.options)?;

    let mut written = Vec::with_capacity(results.len());
    for result in results {
        let path = crate::batch::write_highlighted(&session.dir, &result)?;
        written.push((result, path));
    }

    Ok(Processed {
        session_id: session.id.clone(),
        results: written,
    })
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub file: String,
    pub session: Option<String>,
}

/// Handler: GET /download_html
pub async fn download_html(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, Error> {
    let Some(path) = state
        .uploads
        .locate_highlighted(query.session.as_deref(), &query.file)
    else {
        return Ok(not_found());
    };

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(not_found()),
        Err(e) => return Err(e.into()),
    };

    let disposition = format!(
        "attachment; filename*=UTF-8''{}",
        urlencoding::encode(&highlighted_file_name(&query.file))
    );
    let disposition =
        HeaderValue::from_str(&disposition).map_err(|e| Error::Internal(e.to_string()))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

fn not_found() -> Response {
    log::debug!("Requested highlighted file does not exist");
    (StatusCode::OK, NOT_FOUND_BODY).into_response()
}
