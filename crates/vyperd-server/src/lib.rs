//! HTTP compile service for the Vyper language.
//!
//! # Architecture
//!
//! The server consists of:
//! - **Routes**: the version banner, CORS pre-flight, and the compile
//!   endpoint
//! - **Dispatcher**: a bounded worker pool keeping CPU-bound compiles off
//!   the request-accepting runtime
//! - **Protocol**: the JSON request/response envelope and the failure
//!   classifier

pub mod dispatcher;
pub mod error;
pub mod protocol;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use vyperd_core::Compiler;

pub use dispatcher::WorkerPool;
pub use error::{ServerError, ServerResult};
pub use protocol::{CompileRequest, CompileResponse, Diagnostic};
pub use routes::{AppState, create_router};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Number of concurrent compile slots.
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            workers: 4,
        }
    }
}

/// Start the compile service and run until interrupted.
pub async fn serve(compiler: Arc<dyn Compiler>, config: ServerConfig) -> ServerResult<()> {
    let state = Arc::new(AppState::new(compiler, config.workers));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|_| ServerError::Address(format!("{}:{}", config.host, config.port)))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("vyperd listening on http://{}", addr);

    // Ctrl+C triggers a graceful shutdown.
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("received shutdown signal");
            let _ = shutdown_tx.send(());
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        })
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}
