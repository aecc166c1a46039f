pub mod api;
pub mod config;
pub mod patient;
pub mod store;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::ApiContext;
use crate::config::AppConfig;
use crate::store::{MongoPatientStore, PatientStore};

/// Install the global tracing subscriber. `RUST_LOG` overrides the
/// default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Connect the store, start the server and run until Ctrl-C.
pub async fn run(config: AppConfig) -> Result<(), String> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    tracing::debug!(?config, "Resolved configuration");

    let store = MongoPatientStore::connect(&config)
        .await
        .map_err(|e| format!("Cannot create store client: {e}"))?;

    // An unreachable store is not fatal; requests fail until it comes back.
    match store.ping().await {
        Ok(()) => tracing::info!("Connected to MongoDB"),
        Err(e) => tracing::warn!(error = %e, "MongoDB ping failed, continuing"),
    }

    let ctx = ApiContext::from_config(Arc::new(store), &config);
    let mut server = api::start_server(ctx, config.bind_addr()).await?;
    tracing::info!(addr = %server.session.server_addr, "Listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {e}");
    }
    server.shutdown();
    server.join().await;
    Ok(())
}
