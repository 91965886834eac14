//! Text recognition behind a small async trait.
//!
//! Services only ever see [`OcrEngine`]; the concrete engine is chosen from
//! [`OcrSettings`] at startup.

pub mod executor;
pub mod tesseract;

pub use executor::CommandExecutor;
pub use tesseract::TesseractEngine;

use crate::config::{get_env, get_env_parsed};
use crate::error::AppError;
use async_trait::async_trait;
use image::GrayImage;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Failed to encode image for OCR: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("OCR timed out after {0} seconds")]
    Timeout(u64),

    #[error("OCR command failed: {0}")]
    CommandFailed(String),

    #[error("OCR I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns a normalized bitmap into text. Any string, including an empty one,
/// is a valid result.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    fn name(&self) -> &'static str;

    async fn recognize(&self, image: &GrayImage) -> Result<String, OcrError>;
}

/// Returns a fixed text for every image.
#[derive(Debug, Clone, Default)]
pub struct MockOcrEngine {
    text: String,
}

impl MockOcrEngine {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl OcrEngine for MockOcrEngine {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn recognize(&self, _image: &GrayImage) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OcrBackend {
    Tesseract,
    Mock,
}

impl std::str::FromStr for OcrBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tesseract" => Ok(OcrBackend::Tesseract),
            "mock" => Ok(OcrBackend::Mock),
            _ => Err(format!("Invalid OCR engine: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OcrSettings {
    pub backend: OcrBackend,
    pub command: String,
    pub timeout_secs: u64,
    pub max_concurrent: usize,
    pub mock_text: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            backend: OcrBackend::Tesseract,
            command: "tesseract".to_string(),
            timeout_secs: 30,
            max_concurrent: 4,
            mock_text: String::new(),
        }
    }
}

impl OcrSettings {
    pub fn from_env(is_prod: bool) -> Result<Self, AppError> {
        let backend: OcrBackend = get_env("OCR_ENGINE", Some("tesseract"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let mock_text = match backend {
            OcrBackend::Mock => std::env::var("OCR_MOCK_TEXT").unwrap_or_default(),
            OcrBackend::Tesseract => String::new(),
        };

        Ok(Self {
            backend,
            command: get_env("TESSERACT_CMD", Some("tesseract"), is_prod)?,
            timeout_secs: get_env_parsed("OCR_TIMEOUT_SECS", "30", is_prod)?,
            max_concurrent: get_env_parsed("OCR_MAX_CONCURRENT", "4", is_prod)?,
            mock_text,
        })
    }

    pub fn build_engine(&self) -> Arc<dyn OcrEngine> {
        match self.backend {
            OcrBackend::Tesseract => {
                tracing::info!(
                    command = %self.command,
                    timeout_secs = self.timeout_secs,
                    max_concurrent = self.max_concurrent,
                    "Using tesseract OCR engine"
                );
                Arc::new(TesseractEngine::new(
                    self.command.clone(),
                    Duration::from_secs(self.timeout_secs),
                    self.max_concurrent,
                ))
            }
            OcrBackend::Mock => {
                tracing::warn!("Using mock OCR engine");
                Arc::new(MockOcrEngine::new(self.mock_text.clone()))
            }
        }
    }
}
