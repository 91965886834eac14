pub mod health;
pub mod medicine;
pub mod metrics;

pub use health::{health_check, readiness_check};
pub use medicine::{get_medicine, scan_medicine};
pub use metrics::metrics;
