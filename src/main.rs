use tracing::info;
use vigil::checker::{HealthAggregator, ServiceProber};
use vigil::config::Settings;
use vigil::server::{create_metrics, run_server, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting VIGIL health aggregator");

    // Load the service map and listener port (fatal on malformed config)
    let settings = Settings::from_env()?;

    let aggregator = HealthAggregator::new(settings.services.clone(), ServiceProber::new());
    info!(
        services = ?aggregator.service_names(),
        "Service map configured"
    );

    let metrics = create_metrics()?;
    let state = AppState::new(aggregator, metrics);

    // Bind failure surfaces as a fatal startup error
    run_server(settings.port, state).await?;

    Ok(())
}
