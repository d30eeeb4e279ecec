// POST /analyze: score a multipart batch of documents.
//
// Every part named "files" is one upload; other parts are ignored.
// Returns 400 for input problems (no files, too few/many, not enough
// usable text) and 500 when the computation itself fails. The analysis is
// CPU-bound, so it runs on the blocking pool.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::analysis::UploadedFile;
use crate::web::{api_error, AppState};

const FILES_FIELD: &str = "files";

/// POST /analyze: compare every uploaded document against every other.
pub async fn analyze(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut files = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return api_error(
                    StatusCode::BAD_REQUEST,
                    &format!("Malformed upload: {}", e.body_text()),
                )
            }
        };

        if field.name() != Some(FILES_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        match field.bytes().await {
            Ok(bytes) => files.push(UploadedFile {
                filename,
                bytes: bytes.to_vec(),
            }),
            Err(e) => {
                return api_error(
                    StatusCode::BAD_REQUEST,
                    &format!("Could not read {filename}: {}", e.body_text()),
                )
            }
        }
    }

    if files.is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "No files uploaded");
    }

    let analyzer = state.analyzer.clone();
    let extractor = state.extractor.clone();
    let joined =
        tokio::task::spawn_blocking(move || analyzer.analyze(extractor.as_ref(), &files)).await;

    match joined {
        Ok(Ok(outcome)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "total_files": outcome.report.total_files,
                "comparisons": outcome.report.comparisons,
                "results": outcome.report.results,
                "files_received": outcome.files_received,
                "skipped": outcome.skipped,
            })),
        )
            .into_response(),
        Ok(Err(e)) if e.is_client_error() => api_error(StatusCode::BAD_REQUEST, &e.to_string()),
        Ok(Err(e)) => {
            error!(error = %e, "Similarity analysis failed");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error computing similarities",
            )
        }
        Err(e) => {
            error!(error = %e, "Analysis task panicked");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}
