//! Upload API integration tests.
//!
//! Run with: `cargo test -p picstash-api --test upload_test`

mod helpers;

use axum::http::StatusCode;
use helpers::fixtures::{create_noise_png, create_test_gif, create_test_png};
use helpers::{setup_test_app, setup_test_app_with, upload_form, TEST_API_KEY};
use image::{GenericImageView, ImageFormat};
use picstash_core::UploadResponse;
use uuid::Uuid;

#[tokio::test]
async fn test_upload_resizes_and_serves_jpeg() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(upload_form(create_test_png(2000, 1000), Some("cover")))
        .await;

    response.assert_status_ok();
    let body: UploadResponse = response.json();
    assert!(body.url.ends_with("/cover.jpeg"), "unexpected url {}", body.url);
    assert!(body.size_after > 0);

    let on_disk = std::fs::metadata(app.upload_dir().join("cover.jpeg")).unwrap();
    assert_eq!(on_disk.len(), body.size_after);

    let served = client.get("/cover.jpeg").await;
    served.assert_status_ok();
    assert_eq!(served.header("content-type"), "image/jpeg");

    let bytes = served.as_bytes();
    assert_eq!(image::guess_format(bytes).unwrap(), ImageFormat::Jpeg);
    let decoded = image::load_from_memory(bytes).unwrap();
    assert_eq!(decoded.dimensions(), (1280, 640));
}

#[tokio::test]
async fn test_upload_does_not_upscale_small_image() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(upload_form(create_test_png(300, 200), Some("small")))
        .await;
    response.assert_status_ok();

    let stored = std::fs::read(app.upload_dir().join("small.jpeg")).unwrap();
    let decoded = image::load_from_memory(&stored).unwrap();
    assert_eq!(decoded.dimensions(), (300, 200));
}

#[tokio::test]
async fn test_upload_accepts_other_formats() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(upload_form(create_test_gif(64, 64), Some("anim")))
        .await;
    response.assert_status_ok();

    let stored = std::fs::read(app.upload_dir().join("anim.jpeg")).unwrap();
    assert_eq!(image::guess_format(&stored).unwrap(), ImageFormat::Jpeg);
}

#[tokio::test]
async fn test_upload_without_name_uses_uuid() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(upload_form(create_test_png(40, 40), None))
        .await;
    response.assert_status_ok();

    let body: UploadResponse = response.json();
    let file_name = body.url.rsplit('/').next().unwrap();
    let stem = file_name.strip_suffix(".jpeg").expect("stored as .jpeg");
    assert_eq!(Uuid::parse_str(stem).unwrap().get_version_num(), 4);
    assert!(app.upload_dir().join(file_name).is_file());
}

#[tokio::test]
async fn test_upload_blank_name_uses_uuid() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(upload_form(create_test_png(40, 40), Some("   ")))
        .await;
    response.assert_status_ok();

    let body: UploadResponse = response.json();
    let stem = body
        .url
        .rsplit('/')
        .next()
        .and_then(|f| f.strip_suffix(".jpeg"))
        .unwrap();
    assert!(Uuid::parse_str(stem).is_ok());
}

#[tokio::test]
async fn test_upload_same_name_overwrites() {
    let app = setup_test_app().await;
    let client = app.client();

    let first = client
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(upload_form(create_test_png(100, 50), Some("avatar")))
        .await;
    first.assert_status_ok();

    let second = client
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(upload_form(create_test_png(60, 60), Some("avatar")))
        .await;
    second.assert_status_ok();

    let stored = std::fs::read(app.upload_dir().join("avatar.jpeg")).unwrap();
    let decoded = image::load_from_memory(&stored).unwrap();
    assert_eq!(decoded.dimensions(), (60, 60));
}

#[tokio::test]
async fn test_upload_wrong_key_is_unauthorized() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .add_header("X-API-Key", "not-the-key")
        .multipart(upload_form(create_test_png(40, 40), Some("nope")))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Unauthorized to upload file");
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert!(!app.upload_dir().join("nope.jpeg").exists());
}

#[tokio::test]
async fn test_upload_missing_key_is_unauthorized() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(create_test_png(40, 40), None))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_path_serves_and_deletes_like_any_file() {
    let app = setup_test_app().await;
    let client = app.client();

    client
        .get("/upload")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    client
        .delete("/upload")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    client
        .delete("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    std::fs::write(app.upload_dir().join("upload"), b"named upload").unwrap();
    let response = client.get("/upload").await;
    response.assert_status_ok();
    response.assert_text("named upload");

    client
        .delete("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .await
        .assert_status_ok();
    assert!(!app.upload_dir().join("upload").exists());
}

#[tokio::test]
async fn test_upload_wrong_key_wins_over_bad_payload() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .add_header("X-API-Key", "wrong")
        .text("definitely not multipart")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_empty_configured_key_matches_empty_header() {
    let app = setup_test_app_with(|config| config.api_key = String::new()).await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(create_test_png(20, 20), Some("open")))
        .await;
    response.assert_status_ok();

    let rejected = app
        .client()
        .post("/upload")
        .add_header("X-API-Key", "anything")
        .multipart(upload_form(create_test_png(20, 20), Some("open")))
        .await;
    rejected.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_missing_file_field() {
    let app = setup_test_app().await;

    let form = axum_test::multipart::MultipartForm::new().add_text("name", "cover");
    let response = app
        .client()
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "No image found");
}

#[tokio::test]
async fn test_upload_multiple_file_fields() {
    let app = setup_test_app().await;

    let form = axum_test::multipart::MultipartForm::new()
        .add_part(
            "file",
            axum_test::multipart::Part::bytes(create_test_png(10, 10)).file_name("a.png"),
        )
        .add_part(
            "file",
            axum_test::multipart::Part::bytes(create_test_png(10, 10)).file_name("b.png"),
        );
    let response = app
        .client()
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_non_multipart_body() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .text("plain text body")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_over_limit_is_bad_request() {
    let app = setup_test_app_with(|config| config.max_upload_mb = 1).await;

    let data = create_noise_png(800, 800);
    assert!(data.len() > 1024 * 1024);

    let response = app
        .client()
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(upload_form(data, Some("huge")))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "File size limit exceeded: 1MB");
    assert!(!app.upload_dir().join("huge.jpeg").exists());
}

#[tokio::test]
async fn test_upload_non_image_is_unsupported() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(upload_form(b"%PDF-1.4 not an image".to_vec(), Some("doc")))
        .await;

    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Invalid file format");
    assert!(!app.upload_dir().join("doc.jpeg").exists());
}

#[tokio::test]
async fn test_upload_rejects_unsafe_names() {
    let app = setup_test_app().await;

    for name in ["../escape", "nested/name", "back\\slash", ".."] {
        let response = app
            .client()
            .post("/upload")
            .add_header("X-API-Key", TEST_API_KEY)
            .multipart(upload_form(create_test_png(10, 10), Some(name)))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    assert!(!app.outside_dir().join("escape.jpeg").exists());
    assert!(!app.upload_dir().join("nested").exists());
}

#[tokio::test]
async fn test_upload_name_with_inner_dots() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(upload_form(create_test_png(10, 10), Some("holiday..beach")))
        .await;

    response.assert_status_ok();
    let body: UploadResponse = response.json();
    assert!(body.url.ends_with("/holiday..beach.jpeg"));
    assert!(app.upload_dir().join("holiday..beach.jpeg").is_file());
    app.client()
        .get("/holiday..beach.jpeg")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_upload_url_uses_configured_base_url() {
    let app = setup_test_app_with(|config| {
        config.public_base_url = Some("https://img.example.com/".to_string())
    })
    .await;

    let response = app
        .client()
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(upload_form(create_test_png(10, 10), Some("banner")))
        .await;
    response.assert_status_ok();

    let body: UploadResponse = response.json();
    assert_eq!(body.url, "https://img.example.com/banner.jpeg");
}

#[tokio::test]
async fn test_upload_url_uses_forwarded_proto() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .add_header("X-Forwarded-Proto", "https")
        .multipart(upload_form(create_test_png(10, 10), Some("proxied")))
        .await;
    response.assert_status_ok();

    let body: UploadResponse = response.json();
    assert!(body.url.starts_with("https://"), "unexpected url {}", body.url);
    assert!(body.url.ends_with("/proxied.jpeg"));
}
