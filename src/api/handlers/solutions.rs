use crate::AppState;
use crate::api::error::AppError;
use crate::utils::validation::{
    content_type_for, is_safe_filename, is_storable_filename, sanitize_filename,
};
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

const NO_FILE_MESSAGE: &str =
    "No file uploaded. Please use multipart/form-data with field name \"file\"";

const ROUTE_PREFIX: &str = "/solution/";

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
    pub original_name: String,
    pub size: u64,
    pub path: String,
}

/// Multipart form accepted by `POST /solution` (documentation only).
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

struct ReceivedFile {
    original_name: String,
    data: Vec<u8>,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body exceeds the maximum allowed limit".to_string())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// Pulls the first file part named "file", enforcing the size limit while streaming.
async fn receive_file(
    multipart: &mut Multipart,
    max_size: usize,
) -> Result<Option<ReceivedFile>, AppError> {
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        // A plain text field named "file" is not an upload
        let original_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };

        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            if data.len() + chunk.len() > max_size {
                return Err(AppError::PayloadTooLarge(format!(
                    "File exceeds the maximum allowed size of {} bytes ({} MB)",
                    max_size,
                    max_size / 1024 / 1024
                )));
            }
            data.extend_from_slice(&chunk);
        }

        return Ok(Some(ReceivedFile {
            original_name,
            data,
        }));
    }

    Ok(None)
}

#[utoipa::path(
    post,
    path = "/solution",
    request_body(content = UploadForm, content_type = "multipart/form-data", description = "Solution file"),
    responses(
        (status = 201, description = "Solution stored", body = UploadResponse),
        (status = 400, description = "No file in the request", body = crate::api::error::ErrorResponse),
        (status = 413, description = "File larger than the configured limit", body = crate::api::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::api::error::ErrorResponse)
    ),
    tag = "solutions"
)]
pub async fn upload_solution(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut multipart = multipart.map_err(|_| AppError::BadRequest(NO_FILE_MESSAGE.to_string()))?;

    let received = receive_file(&mut multipart, state.config.max_file_size)
        .await?
        .ok_or_else(|| AppError::BadRequest(NO_FILE_MESSAGE.to_string()))?;

    let filename = sanitize_filename(&received.original_name);
    if !is_storable_filename(&filename) {
        warn!(original = %received.original_name, "Rejected upload with unusable filename");
        return Err(AppError::InvalidFilename);
    }

    let size = state.storage.save(&filename, &received.data).await?;
    info!(filename = %filename, original = %received.original_name, size, "Stored solution");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            success: true,
            message: "Solution uploaded successfully".to_string(),
            path: format!("{}{}", ROUTE_PREFIX, filename),
            filename,
            original_name: received.original_name,
            size,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/solution/{filename}",
    params(
        ("filename" = String, Path, description = "Stored solution filename")
    ),
    responses(
        (status = 200, description = "Raw file content, content type inferred from the extension"),
        (status = 400, description = "Filename contains path traversal characters", body = crate::api::error::ErrorResponse),
        (status = 404, description = "No such file", body = crate::api::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::api::error::ErrorResponse)
    ),
    tag = "solutions"
)]
pub async fn get_solution(State(state): State<AppState>, uri: Uri) -> Result<Response, AppError> {
    // Checked on the segment exactly as received, then again once decoded
    let raw = uri.path().strip_prefix(ROUTE_PREFIX).unwrap_or_default();
    if raw.is_empty() || !is_safe_filename(raw) {
        warn!(raw = %raw, "Rejected solution lookup with unsafe filename");
        return Err(AppError::InvalidFilename);
    }

    let filename = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| AppError::InvalidFilename)?;
    if !is_safe_filename(&filename) {
        warn!(raw = %raw, "Rejected solution lookup with encoded traversal");
        return Err(AppError::InvalidFilename);
    }

    let content = state.storage.read(&filename).await?;

    Ok((
        [(header::CONTENT_TYPE, content_type_for(&filename))],
        content,
    )
        .into_response())
}
