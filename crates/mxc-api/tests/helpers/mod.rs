//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p mxc-api --test upload_test`.

use axum::Extension;
use axum_test::TestServer;
use mxc_api::setup::routes;
use mxc_api::{AppState, AuthenticatedUser};
use mxc_core::{BaseConfig, Config, FileSizeBytes, MediaApiConfig, ServerName};
use mxc_storage::LocalStorage;
use std::sync::Arc;
use tempfile::TempDir;

pub const SERVER_NAME: &str = "example.com";

/// Test application: server, storage, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<LocalStorage>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn test_config(max_file_size_bytes: i64, base_path: &str) -> Config {
    Config::from(MediaApiConfig {
        base: BaseConfig {
            server_port: 8008,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
        },
        server_name: ServerName::new(SERVER_NAME),
        max_file_size_bytes: FileSizeBytes(max_file_size_bytes),
        base_path: base_path.to_string(),
    })
}

/// Setup test app with local storage in a temporary directory.
pub async fn setup_test_app(max_file_size_bytes: i64) -> TestApp {
    build_test_app(max_file_size_bytes, None).await
}

/// Setup test app where every request carries `user_id` as the authenticated uploader.
pub async fn setup_test_app_as(max_file_size_bytes: i64, user_id: &str) -> TestApp {
    build_test_app(max_file_size_bytes, Some(user_id)).await
}

async fn build_test_app(max_file_size_bytes: i64, user_id: Option<&str>) -> TestApp {
    let temp_dir = TempDir::new().expect("create temp dir");
    let base_path = temp_dir.path().to_str().expect("utf-8 temp path").to_string();
    let config = test_config(max_file_size_bytes, &base_path);

    let storage = Arc::new(
        LocalStorage::new(temp_dir.path())
            .await
            .expect("create local storage"),
    );
    let state = Arc::new(AppState::new(config.clone(), storage.clone()));

    let mut router = routes::setup_routes(&config, state).expect("build routes");
    if let Some(user_id) = user_id {
        router = router.layer(Extension(AuthenticatedUser(user_id.to_string())));
    }

    TestApp {
        server: TestServer::new(router).expect("start test server"),
        storage,
        _temp_dir: temp_dir,
    }
}

/// Media id part of an `mxc://` URI served by the test app.
pub fn media_id_of(content_uri: &str) -> String {
    content_uri
        .strip_prefix(&format!("mxc://{}/", SERVER_NAME))
        .unwrap_or_else(|| panic!("unexpected content uri {content_uri}"))
        .to_string()
}
