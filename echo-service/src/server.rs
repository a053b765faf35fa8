//! HTTP server implementation for the echo service.
//!
//! This module assembles the router and runs it on a TCP listener.

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::{routes, Result, ServiceError, ServiceOptions};

/// Prefix the client reaches the API under when proxied.
pub const API_PREFIX: &str = "/api";

/// Routes answered both at the root and under `API_PREFIX`.
fn api_routes() -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/echo", post(routes::echo))
}

/// Build the service router for the given options.
pub fn build_router(options: &ServiceOptions) -> Router {
    // Same routes at the root and under the proxy prefix
    let mut app = api_routes().nest(API_PREFIX, api_routes());

    // Anything no route matches falls through to the static directory
    if let Some(dir) = &options.static_dir {
        info!("Serving static files from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server with the provided options.
pub async fn run_server(options: ServiceOptions) -> Result<()> {
    if options.init_tracing {
        crate::init_tracing(options.log_level);
    }

    // Bind before serving so bind failures carry the address
    let listener = TcpListener::bind(options.bind_address)
        .await
        .map_err(|source| ServiceError::BindError {
            address: options.bind_address,
            source,
        })?;

    serve(listener, &options).await
}

/// Serve on an already bound listener.
pub async fn serve(listener: TcpListener, options: &ServiceOptions) -> Result<()> {
    let app = build_router(options);

    let address = listener
        .local_addr()
        .map_err(|e| ServiceError::ServerError(format!("Failed to read local address: {}", e)))?;
    info!("Starting echo service on {}", address);

    axum::serve(listener, app)
        .await
        .map_err(|e| ServiceError::ServerError(format!("Server error: {}", e)))?;

    Ok(())
}
