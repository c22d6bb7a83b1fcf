//! Assistance Registry server.
//!
//! Loads configuration, seeds the in-memory store and serves the HTTP API.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use assistance_registry::adapters::{app_router, InMemorySessionStore, LoggingEventPublisher};
use assistance_registry::application::{CreateSessionCommand, RegistrationService};
use assistance_registry::config::{AppConfig, LogFormat, ServerConfig};
use assistance_registry::domain::foundation::{CommandMetadata, SessionId};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server)?;
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        "Starting assistance registry"
    );

    let store = Arc::new(InMemorySessionStore::new());
    let publisher = Arc::new(LoggingEventPublisher::new());
    let service = Arc::new(RegistrationService::new(store, publisher));

    for seed in config.registry.seeds()? {
        let cmd = CreateSessionCommand {
            session_id: SessionId::new(seed.id)?,
            name: seed.name,
            max_capacity: seed.max_capacity,
        };
        service
            .create_session(cmd, CommandMetadata::new().with_source("seed"))
            .await?;
    }

    let app = app_router(service, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down");
    Ok(())
}

fn init_tracing(server: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))?;

    let registry = tracing_subscriber::registry().with(filter);
    match server.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init()?,
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
