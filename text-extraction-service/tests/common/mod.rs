use axum::{http::header, routing::get, Router};
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use service_core::config::Config as CoreConfig;
use service_core::ocr::{MockOcrEngine, OcrSettings};
use std::io::Cursor;
use std::sync::Arc;
use text_extraction_service::config::{FetchConfig, TextExtractionConfig};
use text_extraction_service::startup::Application;
use tokio::net::TcpListener;

pub const TEST_MAX_IMAGE_BYTES: usize = 64 * 1024;

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    /// Spawns the service with an OCR engine that always answers `ocr_text`.
    pub async fn spawn(ocr_text: &str) -> Self {
        let config = TextExtractionConfig {
            common: CoreConfig { port: 0 }, // Random port for testing
            fetch: FetchConfig {
                timeout_secs: 5,
                connect_timeout_secs: 2,
                max_image_bytes: TEST_MAX_IMAGE_BYTES,
            },
            ocr: OcrSettings::default(),
        };

        let app = Application::build_with_engine(config, Arc::new(MockOcrEngine::new(ocr_text)))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }

    pub async fn process_image(&self, body: serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/process-image", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Small PNG with dark text-like strokes on a light background.
pub fn sample_png() -> Vec<u8> {
    let image = GrayImage::from_fn(64, 32, |x, y| {
        if (8..56).contains(&x) && (12..20).contains(&y) {
            Luma([20])
        } else {
            Luma([230])
        }
    });

    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("Failed to encode sample image");
    bytes
}

/// In-process HTTP server standing in for a remote image host.
pub struct ImageHost {
    pub address: String,
}

impl ImageHost {
    pub async fn spawn() -> Self {
        let png = sample_png();
        let oversized = vec![0u8; TEST_MAX_IMAGE_BYTES * 2];

        let app = Router::new()
            .route(
                "/label.png",
                get(move || {
                    let png = png.clone();
                    async move { ([(header::CONTENT_TYPE, "image/png")], png) }
                }),
            )
            .route(
                "/page.html",
                get(|| async {
                    (
                        [(header::CONTENT_TYPE, "text/html")],
                        "<html><body>not an image</body></html>",
                    )
                }),
            )
            .route(
                "/huge.png",
                get(move || {
                    let oversized = oversized.clone();
                    async move { ([(header::CONTENT_TYPE, "image/png")], oversized) }
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind image host");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        ImageHost { address }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}
