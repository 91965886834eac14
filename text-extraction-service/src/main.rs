use service_core::observability::init_tracing;
use text_extraction_service::config::TextExtractionConfig;
use text_extraction_service::services::init_metrics;
use text_extraction_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics();

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("text-extraction-service", "info", otlp_endpoint.as_deref());

    let config = TextExtractionConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!(port = app.port(), "Starting text-extraction-service");

    app.run_until_stopped().await?;

    tracing::info!("text-extraction-service stopped");
    Ok(())
}
