pub mod catalog;
pub mod error;
pub mod metrics;
pub mod preprocessing;
pub mod tokenizer;

pub use catalog::{CatalogError, MedicineCatalog};
pub use error::ScanError;
pub use metrics::{get_metrics, init_metrics, record_lookup, record_ocr, record_scan};
pub use tokenizer::tokenize;
