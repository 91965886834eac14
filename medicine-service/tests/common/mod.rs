use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use medicine_service::config::{CatalogConfig, MedicineConfig, UploadConfig};
use medicine_service::services::MedicineCatalog;
use medicine_service::startup::Application;
use reqwest::multipart::{Form, Part};
use service_core::config::Config as CoreConfig;
use service_core::ocr::{MockOcrEngine, OcrSettings};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/medicines.csv")
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawns the service over the fixture catalog with an OCR engine that
    /// always answers `ocr_text`.
    pub async fn spawn(ocr_text: &str) -> Self {
        let catalog = MedicineCatalog::load(fixture_path()).expect("Failed to load fixture");
        Self::spawn_with_catalog(ocr_text, catalog).await
    }

    pub async fn spawn_with_catalog(ocr_text: &str, catalog: MedicineCatalog) -> Self {
        let config = MedicineConfig {
            common: CoreConfig { port: 0 }, // Random port for testing
            catalog: CatalogConfig {
                path: fixture_path(),
            },
            upload: UploadConfig {
                max_upload_bytes: 256 * 1024,
            },
            ocr: OcrSettings::default(),
        };

        let app =
            Application::build_with(config, catalog, Arc::new(MockOcrEngine::new(ocr_text)))
                .await
                .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn scan(&self, field: &str, bytes: Vec<u8>) -> reqwest::Response {
        let part = Part::bytes(bytes)
            .file_name("medicine.jpg")
            .mime_str("image/png")
            .expect("Invalid mime type");
        let form = Form::new().part(field.to_string(), part);

        self.client
            .post(format!("{}/scan-medicine", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_medicine(&self, id: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/medicine/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// PNG of dark print on a light label.
pub fn label_png() -> Vec<u8> {
    let image = GrayImage::from_fn(80, 40, |x, y| {
        if (10..70).contains(&x) && (15..25).contains(&y) && x % 4 != 0 {
            Luma([15])
        } else {
            Luma([235])
        }
    });

    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("Failed to encode label image");
    bytes
}
