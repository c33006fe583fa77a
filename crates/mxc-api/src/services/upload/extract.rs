//! Request intake: transport fields to validated upload metadata.

use axum::http::{header, request::Parts, HeaderMap, HeaderName, Method, Uri};
use mxc_core::{
    Config, ContentDisposition, ContentType, FileSizeBytes, Filename, UploadError, UploadMetadata,
};
use percent_encoding::percent_decode_str;
use uuid::Uuid;

use super::types::{AuthenticatedUser, UploadRequest};

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Declared body length; an absent header is reported as unknown (`-1`).
fn declared_length(headers: &HeaderMap) -> Result<FileSizeBytes, UploadError> {
    match headers.get(header::CONTENT_LENGTH) {
        None => Ok(FileSizeBytes::UNKNOWN),
        Some(value) => value
            .to_str()
            .ok()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .map(FileSizeBytes)
            .ok_or(UploadError::InvalidContentLength),
    }
}

fn form_decode(s: &str) -> Vec<u8> {
    percent_decode_str(&s.replace('+', " ")).collect()
}

/// First `filename` query value, decoded to raw bytes. Later repeats are ignored.
fn filename_param(uri: &Uri) -> Filename {
    uri.query()
        .into_iter()
        .flat_map(|query| query.split('&'))
        .find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (form_decode(key) == b"filename").then(|| Filename::from_bytes(form_decode(value)))
        })
        .unwrap_or_default()
}

/// Read upload metadata from the request head. The body is never touched.
pub fn extract_upload_request(parts: &Parts, config: &Config) -> Result<UploadRequest, UploadError> {
    if parts.method != Method::POST {
        return Err(UploadError::MethodNotPost);
    }

    let span = tracing::info_span!(
        "upload_request",
        request_id = %Uuid::new_v4(),
        origin = %config.server_name(),
    );

    let metadata = UploadMetadata {
        origin: config.server_name().clone(),
        content_disposition: ContentDisposition::new(header_str(
            &parts.headers,
            &header::CONTENT_DISPOSITION,
        )),
        file_size_bytes: declared_length(&parts.headers)?,
        content_type: ContentType::new(header_str(&parts.headers, &header::CONTENT_TYPE)),
        upload_name: filename_param(&parts.uri),
        user_id: parts
            .extensions
            .get::<AuthenticatedUser>()
            .map(|user| user.0.clone())
            .unwrap_or_default(),
        media_id: None,
    };

    Ok(UploadRequest { metadata, span })
}

/// Extract, validate and normalize an upload request.
///
/// Returns the request ready for storage, or the first intake check that failed.
pub fn parse_and_validate_request(
    parts: &Parts,
    config: &Config,
) -> Result<UploadRequest, UploadError> {
    let mut request = extract_upload_request(parts, config)?;
    let span = request.span.clone();
    let _entered = span.enter();

    if let Err(err) = request.metadata.validate(config.max_file_size_bytes()) {
        tracing::debug!(
            code = err.code(),
            file_size_bytes = %request.metadata.file_size_bytes,
            content_type = %request.metadata.content_type,
            "Upload rejected at intake"
        );
        return Err(err);
    }

    // A filename always replaces a client supplied Content-Disposition.
    request.metadata.normalize_content_disposition();

    tracing::debug!(
        file_size_bytes = %request.metadata.file_size_bytes,
        content_type = %request.metadata.content_type,
        content_disposition = %request.metadata.content_disposition,
        "Upload request accepted"
    );

    Ok(request)
}
