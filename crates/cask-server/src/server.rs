use cask_store::{Storage, StorageOptions};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::build_router;

/// Cask file server.
pub struct CaskServer {
    config: ServerConfig,
}

impl CaskServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Construct the storage backend from the configuration.
    pub fn storage(&self) -> Storage {
        Storage::new(StorageOptions::new(
            self.config.storage_root.display().to_string(),
            self.config.scheme.transform(),
        ))
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.storage(), self.config.max_upload_size)
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        std::fs::create_dir_all(&self.config.storage_root)?;
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            root = %self.config.storage_root.display(),
            scheme = ?self.config.scheme,
            "cask server listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| crate::error::ServerError::Internal(e.to_string()))
    }
}
