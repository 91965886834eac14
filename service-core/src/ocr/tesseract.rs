use super::{CommandExecutor, OcrEngine, OcrError};
use async_trait::async_trait;
use image::{GrayImage, ImageFormat};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// OCR through the `tesseract` command line tool.
///
/// The bitmap is streamed as PNG over stdin and the text read from stdout,
/// so no temporary files are involved. Tesseract runs with its defaults: no
/// language, page segmentation or confidence settings are passed.
pub struct TesseractEngine {
    command: String,
    executor: CommandExecutor,
    permits: Arc<Semaphore>,
}

impl TesseractEngine {
    pub fn new(command: impl Into<String>, timeout: Duration, max_concurrent: usize) -> Self {
        Self {
            command: command.into(),
            executor: CommandExecutor::new(timeout),
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }
}

/// Encodes a grayscale bitmap as PNG bytes.
pub fn encode_png(image: &GrayImage) -> Result<Vec<u8>, OcrError> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn recognize(&self, image: &GrayImage) -> Result<String, OcrError> {
        let png = encode_png(image)?;

        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| OcrError::CommandFailed("OCR engine is shutting down".to_string()))?;

        tracing::debug!(
            width = image.width(),
            height = image.height(),
            png_size = png.len(),
            "Running tesseract"
        );

        let output = self
            .executor
            .execute(&self.command, &["stdin", "stdout"], Some(&png))
            .await?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_encode_png_round_trips_pixels() {
        let image = GrayImage::from_fn(4, 3, |x, y| Luma([(x * 10 + y) as u8]));
        let png = encode_png(&image).unwrap();

        assert_eq!(&png[1..4], b"PNG");
        let decoded = image::load_from_memory(&png).unwrap().to_luma8();
        assert_eq!(decoded, image);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_binary_reports_spawn_error() {
        let engine = TesseractEngine::new("no-such-tesseract-binary", Duration::from_secs(1), 1);
        let result = engine.recognize(&GrayImage::new(2, 2)).await;

        assert!(matches!(result, Err(OcrError::Spawn { .. })));
    }
}
