mod common;

use common::TestApp;
use medicine_service::services::MedicineCatalog;
use reqwest::StatusCode;

#[tokio::test]
async fn health_check_reports_catalog_size() {
    let app = TestApp::spawn("").await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "medicine-service");
    assert_eq!(body["medicines"], 7);
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn("").await;

    let response = app
        .client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn readiness_fails_without_catalog() {
    let app = TestApp::spawn_with_catalog("", MedicineCatalog::default()).await;

    let response = app
        .client
        .get(format!("{}/ready", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
