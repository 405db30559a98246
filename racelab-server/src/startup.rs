//! Server startup and shutdown logic

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use racelab_core::{shutdown_channel, Dispatcher, ShutdownController};
use racelab_rest_api::{create_app, AppConfig, AppContext};

use crate::config::ServerConfig;

/// Server application struct
pub struct Server {
    config: ServerConfig,
    dispatcher: Arc<Dispatcher>,
    shutdown: ShutdownController,
}

impl Server {
    /// Create a new server instance.
    ///
    /// Builds the process-wide dispatcher and the shutdown channel its
    /// strategies watch during their simulated delays.
    pub fn new(config: ServerConfig) -> Self {
        let (shutdown, signal) = shutdown_channel();
        let dispatcher = Arc::new(Dispatcher::new(signal));
        Self {
            config,
            dispatcher,
            shutdown,
        }
    }

    /// Build the complete application router.
    pub fn build_app(&self) -> Router {
        let context = AppContext::new(self.dispatcher.clone());
        let app_config = AppConfig {
            enable_cors: self.config.server.enable_cors,
            enable_tracing: self.config.server.enable_tracing,
        };
        create_app(context, app_config)
    }

    /// Bind and serve until a shutdown signal arrives.
    pub async fn start(self) -> Result<()> {
        let app = self.build_app();
        let listener = TcpListener::bind(self.config.server.bind_address).await?;
        let addr = listener.local_addr()?;

        info!("racelab server listening on {addr}");
        for endpoint in Dispatcher::endpoints() {
            info!("  GET /{endpoint}/{{id}} and /{endpoint}/{{id}}/{{timeout_ms}}");
        }

        let shutdown = self.shutdown;
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                // Flip the watch channel first so in-flight delays observe
                // the interruption and still complete their read-back.
                shutdown.trigger();
            })
            .await?;

        info!("server shutdown complete");
        Ok(())
    }
}

/// Resolves when ctrl-c or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install ctrl-c handler: {e}");
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
                tracing::error!("failed to install SIGTERM handler: {e}");
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

    info!("shutdown signal received, starting graceful shutdown");
}
