use std::sync::Arc;

use tokio::net::TcpListener;

use stockroom_blob::FsBlobStore;
use stockroom_inventory::Inventory;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Stockroom HTTP server.
pub struct StockroomServer {
    config: ServerConfig,
    state: AppState,
}

impl StockroomServer {
    /// Validate the config and prepare the blob root.
    ///
    /// Failing to create the blob root is fatal.
    pub async fn open(config: ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        let blobs = FsBlobStore::open(&config.cache_dir).await?;
        let inventory = Arc::new(Inventory::new(Arc::new(blobs)));
        let state = AppState::new(inventory, config.static_dir.clone(), config.max_upload_bytes);
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn inventory(&self) -> &Arc<Inventory> {
        &self.state.inventory
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        self.serve_on(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve_on(
        self,
        listener: TcpListener,
        shutdown: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> ServerResult<()> {
        let app = self.router();
        let addr = listener.local_addr()?;
        tracing::info!(
            %addr,
            cache_dir = %self.config.cache_dir.display(),
            "stockroom listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!("stockroom stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
