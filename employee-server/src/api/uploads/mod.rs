//! Upload Routes
//!
//! Serves stored employee images and resumes at `/uploads/{filename}`.

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use http::{HeaderValue, StatusCode, header};

use crate::core::ServerState;

/// Upload file response
enum UploadFileResponse {
    Ok { content: Bytes, mime: HeaderValue },
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for UploadFileResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            UploadFileResponse::Ok { content, mime } => {
                (StatusCode::OK, [(header::CONTENT_TYPE, mime)], content).into_response()
            }
            UploadFileResponse::NotFound => (StatusCode::NOT_FOUND, "File not found").into_response(),
            UploadFileResponse::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
        }
    }
}

/// Serve uploaded file handler
async fn serve_uploaded_file(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> UploadFileResponse {
    // Security check: prevent path traversal
    let Some(file_path) = state.uploads.path_of(&filename) else {
        return UploadFileResponse::BadRequest("Invalid filename");
    };

    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            let mime = mime_guess::from_path(&file_path).first_or_octet_stream();
            let mime = HeaderValue::from_str(mime.as_ref())
                .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
            UploadFileResponse::Ok {
                content: content.into(),
                mime,
            }
        }
        Err(e) => {
            tracing::debug!(file = %filename, error = %e, "Uploaded file not found");
            UploadFileResponse::NotFound
        }
    }
}

/// Build upload router
pub fn router() -> Router<ServerState> {
    Router::new().route("/uploads/{filename}", get(serve_uploaded_file))
}
