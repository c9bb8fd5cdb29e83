//! HTTP server lifecycle.

use std::sync::Arc;

use anyhow::{Context, Result};
use folio_core::Reader;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::handlers::AppState;
use crate::routes::create_router;

/// Reader view HTTP server
pub struct HttpServer {
    config: ServerConfig,
}

impl HttpServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Binds and serves until Ctrl-C.
    pub async fn run(&self) -> Result<()> {
        let reader = Reader::new(self.config.reader_config()).context("Failed to build HTTP client")?;
        let state = AppState { reader: Arc::new(reader) };
        let app = create_router(state, self.config.request_timeout());

        let listener = TcpListener::bind(self.config.listen)
            .await
            .with_context(|| format!("Failed to bind {}", self.config.listen))?;

        info!("reader listening on http://{}", self.config.listen);

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("shutting down");
            })
            .await
            .context("HTTP server error")?;

        Ok(())
    }
}
