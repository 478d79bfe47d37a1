//! HTTP handlers for the annotator server
//!
//! - Viewer page and its script
//! - PDF upload and retrieval
//! - Annotation forwarding to Notion

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, Multipart, Path, State,
    },
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use chrono::Local;
use notion_blocks::{build_blocks, AnnotationRequest};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;
use crate::storage::{allowed_file, StoredName};

/// Multipart field carrying the uploaded PDF.
const FILE_FIELD: &str = "file";

const INDEX_HTML: &str = include_str!("../static/index.html");
const APP_JS: &str = include_str!("../static/app.js");

/// Handler: GET /
pub async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Handler: GET /static/app.js
pub async fn handle_app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        APP_JS,
    )
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "annotator-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub filename: String,
}

/// Handler: POST /upload
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original = field.file_name().unwrap_or_default().to_string();
        if original.is_empty() {
            return Err(ApiError::InvalidRequest("No selected file".into()));
        }
        if !allowed_file(&original) {
            return Err(ApiError::InvalidRequest("Invalid file type".into()));
        }

        // Sanitizing can eat the extension (e.g. a name made only of
        // non-ASCII characters), so check it again afterwards.
        let name = StoredName::sanitize(&original)
            .filter(|name| allowed_file(name.as_str()))
            .ok_or_else(|| ApiError::InvalidRequest("Invalid file name".into()))?;

        let bytes = field.bytes().await?;
        let path = state.uploads.save(&name, &bytes).await?;
        info!(
            "Stored upload {:?} as {} ({} bytes)",
            original,
            path.display(),
            bytes.len()
        );

        return Ok(Json(UploadResponse {
            url: format!("/pdf/{}", name),
            filename: name.into_string(),
        }));
    }

    Err(ApiError::InvalidRequest("No file part".into()))
}

/// Handler: GET /pdf/:filename
pub async fn handle_serve_pdf(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let name =
        StoredName::exact(&filename).ok_or_else(|| ApiError::NotFound(filename.clone()))?;

    let bytes = state.uploads.read(&name).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::NotFound(filename.clone())
        } else {
            ApiError::Io(e)
        }
    })?;

    let content_type = if allowed_file(name.as_str()) {
        "application/pdf"
    } else {
        "application/octet-stream"
    };

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", name),
            ),
        ],
        bytes,
    ))
}

/// Annotation response
#[derive(Debug, Serialize)]
pub struct AnnotateResponse {
    pub success: bool,
}

/// Handler: POST /annotate
pub async fn handle_annotate(
    State(state): State<AppState>,
    payload: Result<Json<AnnotationRequest>, JsonRejection>,
) -> Result<Json<AnnotateResponse>, ApiError> {
    let Json(request) = payload?;

    let blocks = build_blocks(&request, Local::now().naive_local());
    info!(
        "Annotation for {} page {}: {} blocks",
        request.pdf_name,
        request.page_num,
        blocks.len()
    );
    debug!("Selected text: {:?}", request.selected_text);

    state.notion.append_children(&blocks).await?;

    Ok(Json(AnnotateResponse { success: true }))
}
