mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{fixture_path, label_png, TestApp};
use medicine_service::config::{CatalogConfig, MedicineConfig, UploadConfig};
use medicine_service::services::MedicineCatalog;
use medicine_service::startup::{build_router, AppState};
use serde_json::json;
use service_core::config::Config as CoreConfig;
use service_core::ocr::{MockOcrEngine, OcrSettings};
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn matching_token_returns_classified_medicine() {
    let app = TestApp::spawn("ASPIRIN\n").await;

    let response = app.scan("image", label_png()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "medicines": [{
                "id": "1",
                "name": "Aspirin Tablet",
                "description": "Relief of mild pain and fever",
                "type": "Tablet"
            }]
        })
    );
}

#[tokio::test]
async fn equal_match_counts_keep_catalog_order() {
    let app = TestApp::spawn("cream liquid").await;

    let response = app.scan("image", label_png()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    let medicines = body["medicines"].as_array().unwrap();
    let ids: Vec<_> = medicines.iter().map(|m| m["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["3", "4", "7"]);

    let types: Vec<_> = medicines
        .iter()
        .map(|m| m["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, ["Liquid", "Cream", "Tablet"]);
}

#[tokio::test]
async fn records_matching_more_tokens_rank_first() {
    let app = TestApp::spawn("GAVISCON tablet cream liquid").await;

    let response = app.scan("image", label_png()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    let medicines = body["medicines"].as_array().unwrap();
    let ids: Vec<_> = medicines.iter().map(|m| m["id"].as_str().unwrap()).collect();
    // Gaviscon matches three tokens, the rest one each in table order.
    assert_eq!(ids, ["7", "1", "2", "3", "4"]);
    assert_eq!(medicines[0]["type"], "Tablet");
}

#[tokio::test]
async fn no_match_is_not_found() {
    let app = TestApp::spawn("lorem ipsum").await;

    let response = app.scan("image", label_png()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "No matching medicines found" }));
}

#[tokio::test]
async fn empty_ocr_text_is_not_found() {
    let app = TestApp::spawn("").await;

    let response = app.scan("image", label_png()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_image_payload_is_invalid_format() {
    let app = TestApp::spawn("aspirin").await;

    let response = app.scan("image", b"%PDF-1.4 not an image".to_vec()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Invalid image format" }));
}

#[tokio::test]
async fn missing_image_field_is_rejected() {
    let app = TestApp::spawn("aspirin").await;

    let response = app.scan("photo", label_png()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "No image provided" }));
}

#[tokio::test]
async fn non_multipart_request_is_rejected() {
    let app = TestApp::spawn("aspirin").await;

    let response = app
        .client
        .post(format!("{}/scan-medicine", app.address))
        .json(&json!({ "image": "http://example.com/a.png" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No image provided");
}

#[tokio::test]
async fn malformed_multipart_body_is_missing_image() {
    let app = TestApp::spawn("aspirin").await;

    let response = app
        .client
        .post(format!("{}/scan-medicine", app.address))
        .header("content-type", "multipart/form-data; boundary=XYZ")
        .body("this is not multipart")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "No image provided" }));
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let catalog = MedicineCatalog::load(fixture_path()).unwrap();
    let state = AppState {
        config: MedicineConfig {
            common: CoreConfig { port: 0 },
            catalog: CatalogConfig {
                path: fixture_path(),
            },
            upload: UploadConfig {
                max_upload_bytes: 1024,
            },
            ocr: OcrSettings::default(),
        },
        catalog: Arc::new(catalog),
        ocr: Arc::new(MockOcrEngine::new("aspirin")),
    };

    let boundary = "X-MEDICINE-BOUNDARY";
    let mut body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"big.png\"\r\nContent-Type: image/png\r\n\r\n"
    )
    .into_bytes();
    body.extend(std::iter::repeat(b'a').take(4096));
    body.extend(format!("\r\n--{boundary}--\r\n").into_bytes());

    let response = build_router(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/scan-medicine")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
