pub mod error;
pub mod fetcher;
pub mod metrics;
pub mod preprocessing;

pub use error::ExtractionError;
pub use fetcher::{FetchError, ImageFetcher};
pub use metrics::{get_metrics, init_metrics, record_fetch, record_ocr};
