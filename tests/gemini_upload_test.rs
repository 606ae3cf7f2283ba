mod common;

use axum::http::StatusCode;
use common::{image_part, json_body, staged_files, upload_request, PASSWORD, USER};
use eco_footprint::adapters::gemini::{GeminiClassifier, GeminiConfig};
use eco_footprint::app::auth::CredentialStore;
use eco_footprint::core::sampler::SeededSampler;
use eco_footprint::{router, AppState, Catalog, FootprintEstimator};
use httpmock::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

const MODEL: &str = "gemini-1.5-flash";

fn app_for(server: &MockServer, staging: &TempDir) -> axum::Router {
    let classifier = GeminiClassifier::new(GeminiConfig {
        api_key: "test-key".to_string(),
        base_url: server.base_url(),
        model: MODEL.to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap();
    let estimator = FootprintEstimator::new(
        Arc::new(Catalog::default()),
        Arc::new(SeededSampler::new(99)),
    );
    router(AppState::new(
        Arc::new(classifier),
        estimator,
        CredentialStore::new(USER, PASSWORD),
        staging.path().to_path_buf(),
    ))
}

fn mock_upload(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/upload/v1beta/files")
            .header("x-goog-api-key", "test-key");
        then.status(200).json_body(serde_json::json!({
            "file": {
                "name": "files/xyz",
                "uri": "https://files.example/xyz",
                "mimeType": "image/png"
            }
        }));
    })
}

fn candidate(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
    })
}

#[tokio::test]
async fn test_end_to_end_upload_with_mocked_gemini() {
    let server = MockServer::start();
    let staging = TempDir::new().unwrap();

    let upload_mock = mock_upload(&server);
    let generate_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/v1beta/models/{}:generateContent", MODEL))
            .body_contains("https://files.example/xyz");
        then.status(200).json_body(candidate(
            r#"{"category": "Casual Wear", "items": ["hoodie", "jeans", "invalid"], "cloth_image": "valid"}"#,
        ));
    });

    let response = app_for(&server, &staging)
        .oneshot(upload_request(Some((USER, PASSWORD)), &[image_part(b"png-bytes")]))
        .await
        .unwrap();

    upload_mock.assert();
    generate_mock.assert();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(
        body["carbonfootprint"],
        serde_json::json!({ "hoodie": "2kg", "jeans": "4kg", "invalid": "0kg" })
    );
    assert_eq!(body["total_footprint"], 6.0);
    assert_eq!(body["ecosavings"], 12.0);
    assert_eq!(body["modelused"], MODEL);

    let titles: Vec<&str> = body["coupons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Eco Store"]);
    assert_eq!(staged_files(staging.path()), 0);
}

#[tokio::test]
async fn test_non_json_candidate_text_is_classifier_failure() {
    let server = MockServer::start();
    let staging = TempDir::new().unwrap();

    let _upload_mock = mock_upload(&server);
    let generate_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/v1beta/models/{}:generateContent", MODEL));
        then.status(200)
            .json_body(candidate("Sorry, I can only see a cat in this picture."));
    });

    let response = app_for(&server, &staging)
        .oneshot(upload_request(Some((USER, PASSWORD)), &[image_part(b"cat")]))
        .await
        .unwrap();

    generate_mock.assert();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "detail": "Failed to process classifier response." })
    );
    assert_eq!(staged_files(staging.path()), 0);
}

#[tokio::test]
async fn test_gemini_outage_is_generic_500() {
    let server = MockServer::start();
    let staging = TempDir::new().unwrap();

    let upload_mock = server.mock(|when, then| {
        when.method(POST).path("/upload/v1beta/files");
        then.status(500).body("internal error: quota exhausted");
    });

    let response = app_for(&server, &staging)
        .oneshot(upload_request(Some((USER, PASSWORD)), &[image_part(b"png")]))
        .await
        .unwrap();

    upload_mock.assert();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["detail"], "An unexpected error occurred.");
    assert!(!body.to_string().contains("quota"));
    assert_eq!(staged_files(staging.path()), 0);
}

#[tokio::test]
async fn test_bad_credentials_never_reach_gemini() {
    let server = MockServer::start();
    let staging = TempDir::new().unwrap();
    let upload_mock = mock_upload(&server);

    let response = app_for(&server, &staging)
        .oneshot(upload_request(Some((USER, "nope")), &[image_part(b"png")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    upload_mock.assert_hits(0);
}
