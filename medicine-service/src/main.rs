use medicine_service::config::MedicineConfig;
use medicine_service::services::init_metrics;
use medicine_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics();

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("medicine-service", "info", otlp_endpoint.as_deref());

    let config = MedicineConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!(
        port = app.port(),
        medicines = app.catalog().len(),
        "Starting medicine-service"
    );

    app.run_until_stopped().await?;

    tracing::info!("medicine-service stopped");
    Ok(())
}
