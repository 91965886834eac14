pub mod extraction;
pub mod health;
pub mod metrics;

pub use extraction::process_image;
pub use health::health_check;
pub use metrics::metrics;
