#![allow(dead_code)]

//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p picstash-api`.

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use picstash_api::setup::{routes, storage};
use picstash_api::state::AppState;
use picstash_core::Config;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_API_KEY: &str = "test-api-key";

/// Test application: server, state and the scratch directory backing it.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub upload_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Directory that contains the upload root, used to plant files that
    /// must stay out of reach.
    pub fn outside_dir(&self) -> &Path {
        self._temp_dir.path()
    }
}

/// Setup test app with default settings and local storage in a temp dir.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Setup test app, letting the caller adjust the config first.
pub async fn setup_test_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let upload_dir = temp_dir.path().join("uploads");

    let mut config = Config {
        upload_dir: upload_dir.clone(),
        api_key: TEST_API_KEY.to_string(),
        ..Config::default()
    };
    configure(&mut config);

    let storage = storage::setup_storage(&config)
        .await
        .expect("Failed to create local storage");
    let state = AppState::new(config, storage);
    let app = routes::setup_routes(state.clone());

    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp {
        server,
        state,
        upload_dir,
        _temp_dir: temp_dir,
    }
}

/// Multipart form with the image under `file` and an optional `name`.
pub fn upload_form(data: Vec<u8>, name: Option<&str>) -> MultipartForm {
    let part = Part::bytes(data)
        .file_name("upload.png")
        .mime_type("image/png");
    let form = MultipartForm::new().add_part("file", part);
    match name {
        Some(name) => form.add_text("name", name.to_string()),
        None => form,
    }
}
