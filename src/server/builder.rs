//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::{FormExposure, FormState, RestExposure};
use super::host::ServerHost;
use crate::config::AppConfig;
use crate::core::store::RecordStore;
use crate::storage::JsonFileStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for creating the intake HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(AppConfig::load()?)
///     .build()?;
/// ```
///
/// Without an explicit store the builder opens a [`JsonFileStore`] at
/// `storage.data_file`.
pub struct ServerBuilder {
    config: AppConfig,
    store: Option<Arc<dyn RecordStore>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            store: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the configuration
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a specific record store instead of the configured data file
    pub fn with_store(mut self, store: impl RecordStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let store = match self.store.take() {
            Some(store) => store,
            None => {
                tracing::info!(
                    path = %self.config.storage.data_file.display(),
                    "Using JSON file record store"
                );
                Arc::new(JsonFileStore::new(self.config.storage.data_file.clone()))
            }
        };

        ServerHost::new(self.config.clone(), store)
    }

    /// Build the final router
    ///
    /// This generates:
    /// - Form routes (`/`, `/success`)
    /// - JSON API and health routes
    /// - Custom routes
    pub fn build(mut self) -> Result<Router> {
        let host = self.build_host()?;

        let form_state = FormState {
            intake: host.intake.clone(),
            templates: host.templates.clone(),
        };

        let mut app = FormExposure::build_router(form_state)
            .merge(RestExposure::build_router(host.intake.clone()));

        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to `server.bind` from the configuration
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
