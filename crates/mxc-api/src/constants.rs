//! Route paths

/// Client-server media upload endpoint.
pub const UPLOAD_PATH: &str = "/_matrix/media/r0/upload";

/// OpenAPI document location.
pub const OPENAPI_PATH: &str = "/api/openapi.json";
