use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use salvo::prelude::*;
use tracing::info;

use crate::config::Config;
use crate::db::ItemStore;

pub mod error;
pub mod handlers;
pub mod routes;

use self::error::ApiError;
use self::routes::create_router;

/// Shared state injected into every request's depot by the router.
#[derive(Clone)]
pub struct WebState {
    pub items: Arc<dyn ItemStore>,
    pub started_at: Instant,
}

impl WebState {
    pub fn new(items: Arc<dyn ItemStore>) -> Self {
        Self {
            items,
            started_at: Instant::now(),
        }
    }
}

pub fn web_state(depot: &Depot) -> Result<&WebState, ApiError> {
    depot.obtain::<WebState>().map_err(|_| ApiError::StateMissing)
}

pub struct WebServer {
    config: Arc<Config>,
    state: WebState,
}

impl WebServer {
    pub fn new(config: Arc<Config>, items: Arc<dyn ItemStore>) -> Self {
        Self {
            config,
            state: WebState::new(items),
        }
    }

    /// Serves until Ctrl-C, then lets in-flight requests finish.
    ///
    /// Fails if the listen address cannot be bound.
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.server.listen_addr();
        info!("Starting web server on {}", bind_addr);

        let acceptor = TcpListener::new(bind_addr.clone())
            .try_bind()
            .await
            .with_context(|| format!("failed to bind web server to {bind_addr}"))?;
        let server = Server::new(acceptor);
        let handle = server.handle();

        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("shutdown signal received, stopping web server");
                    handle.stop_graceful(None);
                }
                // Without a signal handler the server keeps running until killed.
                Err(err) => tracing::error!("failed to listen for shutdown signal: {}", err),
            }
        });

        server.serve(create_router(self.state)).await;
        info!("web server stopped");

        Ok(())
    }
}
