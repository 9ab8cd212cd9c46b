use std::time::Duration;

use paywall::{routes::create_router_with_timeout, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,paywall=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting membership paywall service");

    let config = Config::load()?;

    tracing::info!(
        "Loaded configuration - Server: {}:{}, catalog products: {}",
        config.server.host,
        config.server.port,
        config.catalog.products.len()
    );

    let state = AppState::new(&config).await?;

    tracing::info!("Initialized application state");

    let app = create_router_with_timeout(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
