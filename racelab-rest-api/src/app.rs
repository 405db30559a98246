//! Main application configuration and router setup

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{context::AppContext, errors::RestError, handlers};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Enable permissive CORS middleware
    pub enable_cors: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            enable_tracing: true,
        }
    }
}

/// Create the complete REST application.
///
/// One route pair per strategy, path-parameter form; the demo endpoints sit
/// at the root rather than under an API prefix.
pub fn create_app(context: AppContext, config: AppConfig) -> Router {
    let mut app = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/unsafe/{id}", get(handlers::shared_mutable))
        .route(
            "/unsafe/{id}/{timeout_ms}",
            get(handlers::shared_mutable_with_timeout),
        )
        .route("/safe-prototype/{id}", get(handlers::per_call_instance))
        .route(
            "/safe-prototype/{id}/{timeout_ms}",
            get(handlers::per_call_instance_with_timeout),
        )
        .route("/safe-singleton/{id}", get(handlers::call_local))
        .route(
            "/safe-singleton/{id}/{timeout_ms}",
            get(handlers::call_local_with_timeout),
        )
        .fallback(fallback_handler)
        .with_state(context);

    if config.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }
    if config.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    app
}

/// Unknown paths get the standard error envelope instead of an empty 404.
async fn fallback_handler(uri: axum::http::Uri) -> RestError {
    RestError::not_found(format!("no route for '{}'", uri.path()))
}
