use axum::Json;
use axum::Extension;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::PdfConverter;
use crate::application::services::ConversionError;
use crate::domain::{ContentType, UploadedDocument};
use crate::infrastructure::observability::RequestId;
use crate::presentation::state::AppState;

pub const FILE_FIELD: &str = "file";
pub const INVALID_FILE_TYPE_DETAIL: &str = "Invalid file type. Only PDF is allowed.";
pub const OUTPUT_NOT_FOUND_DETAIL: &str = "HTML file not found after conversion.";

#[derive(Serialize)]
pub struct UploadResponse {
    pub html_content: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[tracing::instrument(skip_all)]
pub async fn upload_handler<C>(
    State(state): State<AppState<C>>,
    Extension(request_id): Extension<RequestId>,
    mut multipart: Multipart,
) -> Response
where
    C: PdfConverter + ?Sized + 'static,
{
    let upload = match read_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };

    tracing::debug!(
        request_id = request_id.as_str(),
        filename = %upload.filename,
        content_type = %upload.media_type,
        bytes = upload.data.len(),
        "Processing file upload"
    );

    match state.conversion_service.convert(&upload).await {
        Ok(html) => {
            tracing::info!(
                request_id = request_id.as_str(),
                filename = %upload.filename,
                html_bytes = html.as_str().len(),
                "Upload converted"
            );
            (
                StatusCode::OK,
                Json(UploadResponse {
                    html_content: html.into_string(),
                }),
            )
                .into_response()
        }
        Err(e) => conversion_error_response(&request_id, e),
    }
}

async fn read_upload(multipart: &mut Multipart) -> Result<UploadedDocument, Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                tracing::warn!("Upload request with no file");
                return Err(error_response(StatusCode::BAD_REQUEST, "No file uploaded"));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {e}"),
                ));
            }
        };

        if field.name() != Some(FILE_FIELD) {
            tracing::debug!(field = ?field.name(), "Skipping unexpected multipart field");
            continue;
        }

        let filename = field.file_name().unwrap_or("unknown").to_string();
        let media_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = field.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read file bytes");
            error_response(StatusCode::BAD_REQUEST, format!("Failed to read file: {e}"))
        })?;

        return Ok(UploadedDocument::new(filename, media_type, data));
    }
}

fn conversion_error_response(request_id: &RequestId, error: ConversionError) -> Response {
    let request_id = request_id.as_str();
    match &error {
        ConversionError::InvalidContentType(content_type) => {
            tracing::warn!(
                request_id,
                content_type = %content_type,
                expected = ContentType::Pdf.as_mime(),
                "Rejected non-PDF upload"
            );
            error_response(StatusCode::BAD_REQUEST, INVALID_FILE_TYPE_DETAIL)
        }
        ConversionError::OutputNotFound(_) => {
            tracing::error!(request_id, error = %error, "Converter produced no HTML output");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, OUTPUT_NOT_FOUND_DETAIL)
        }
        _ => {
            tracing::error!(request_id, error = %error, "Error during file processing");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An error occurred: {error}"),
            )
        }
    }
}

fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
        .into_response()
}
