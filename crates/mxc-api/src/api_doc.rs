use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::services::upload::UploadResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "mxc media API",
        description = "Matrix media upload endpoint"
    ),
    paths(crate::handlers::upload::upload),
    components(schemas(UploadResponse, ErrorResponse)),
    tags((name = "media", description = "Media upload"))
)]
pub struct ApiDoc;
