//! greencart-backend server entry point.
//!
//! Wires the product store, service and router together and starts the Axum
//! HTTP server.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use greencart_backend::api;
use greencart_backend::app_state::AppState;
use greencart_backend::config::AppConfig;
use greencart_backend::persistence::{
    InMemoryProductRepository, PostgresProductRepository, ProductRepository,
};
use greencart_backend::service::ProductService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (also reads `.env`, so it precedes tracing setup)
    let config = AppConfig::from_env()?;
    init_tracing();
    tracing::info!(addr = %config.listen_addr, "starting greencart-backend");

    // Build persistence layer
    let repository: Arc<dyn ProductRepository> = if config.persistence_enabled {
        let postgres = PostgresProductRepository::connect(&config).await?;
        postgres.ensure_schema().await?;
        Arc::new(postgres)
    } else {
        tracing::warn!("persistence disabled; products are kept in memory");
        Arc::new(InMemoryProductRepository::new())
    };

    // Build service layer and router
    let app_state = AppState::new(ProductService::new(repository));
    let app = api::build_app(app_state, &config.cors);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Text logs by default; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
