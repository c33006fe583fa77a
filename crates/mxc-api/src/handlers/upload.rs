use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::{parse_and_validate_request, UploadResponse, UploadService};
use crate::state::AppState;

/// Upload media handler
///
/// Mounted for every method so that a wrong verb gets the Matrix 400 error
/// instead of a bare 405. Intake runs on the request head only; the body is
/// streamed to storage once the metadata has been accepted.
///
/// # Errors
/// - `M_UNKNOWN` (400) - wrong method, missing or oversized Content-Length,
///   missing Content-Type, user id without `@`, body length mismatch
/// - `M_BAD_JSON` (400) - user id not of the form `@localpart:domain`
/// - `M_UNKNOWN` (500) - storage failure
#[utoipa::path(
    post,
    path = "/_matrix/media/r0/upload",
    tag = "media",
    params(
        ("filename" = Option<String>, Query, description = "Name of the uploaded file"),
        ("Content-Type" = String, Header, description = "MIME type of the upload"),
        ("Content-Length" = i64, Header, description = "Size of the upload in bytes")
    ),
    request_body(content = String, description = "Raw media bytes", content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Media stored", body = UploadResponse),
        (status = 400, description = "Upload rejected", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(method = %request.method(), operation = "upload_media"))]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let (parts, body) = request.into_parts();

    let upload_request = parse_and_validate_request(&parts, &state.config)?;

    let service = UploadService::new(state.storage.clone());
    let response = service.upload(upload_request, body).await?;

    Ok(Json(response))
}
