use std::net::SocketAddr;
use std::sync::Arc;

use opentelemetry::metrics::MeterProvider as _;
use sim_service::config::Config;
use sim_service::observability::{self, ProductMetrics};
use sim_service::routes::{self, AppState};
use sim_service::services::RandomDelay;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sim_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting integration simulator");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!("Configuration loaded successfully");

    // Install the meter provider and build the instrument registry
    let provider = observability::init_meter_provider(&config).map_err(|e| {
        error!("Failed to initialize metrics pipeline: {}", e);
        e
    })?;
    let meter = provider.meter(observability::METER_NAME);
    let backend = Arc::new(ProductMetrics::new(meter));

    info!("Metrics pipeline initialized");

    // Parse bind address before moving config
    let bind_address = config.bind_address.clone();

    // Create application state
    let state = Arc::new(AppState::new(config, backend, Arc::new(RandomDelay)));

    // Build application routes
    let app = routes::build_routes(state);

    let addr: SocketAddr = bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("Integration simulator listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
