//! Metrics collection and Prometheus export.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the metrics recorder.
///
/// This must be called once at startup before any metrics are recorded.
/// Panics if called more than once.
pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_scan(outcome: &'static str) {
    counter!("medicine_scans_total", "outcome" => outcome).increment(1);
}

pub fn record_lookup(outcome: &'static str) {
    counter!("medicine_lookups_total", "outcome" => outcome).increment(1);
}

pub fn record_ocr(outcome: &'static str, duration: Duration) {
    counter!("ocr_requests_total", "outcome" => outcome).increment(1);
    histogram!("ocr_duration_seconds").record(duration.as_secs_f64());
}
