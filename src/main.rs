mod api_doc;
mod config;
mod distance;
mod error;
mod handlers;
mod models;
mod places;
mod review;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::Context;
use config::Config;
use state::AppState;
use store::KvStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    tracing::info!("kyushu-trip-server starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store = KvStore::from_config(&config);
    if let Some(store) = &store {
        if let Err(e) = store.bootstrap().await {
            tracing::error!("Database bootstrap failed, continuing without schema check: {:#}", e);
        }
    }

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let state = AppState::new(Arc::new(config), store)?;
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
