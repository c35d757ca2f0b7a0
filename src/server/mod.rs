//! HTTP surface for the import resolver: one JSON endpoint behind permissive CORS.

mod config;
mod routes;

pub use config::{ConfigError, ServerConfig};

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::Request;
use axum::http::{HeaderName, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::ImportClient;

/// Headers browsers may send to the endpoint from the web client.
const ALLOWED_HEADERS: &[&str] = &[
    "authorization",
    "x-client-info",
    "apikey",
    "content-type",
    "x-supabase-client-platform",
    "x-supabase-client-platform-version",
    "x-supabase-client-runtime",
    "x-supabase-client-runtime-version",
];

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub client: ImportClient,
}

/// Build the application router around `client`.
///
/// `OPTIONS` requests get `204 No Content` with an empty body; every response
/// carries `Access-Control-Allow-Origin: *`.
pub fn create_app(client: ImportClient) -> Router {
    routes::router()
        .layer(cors_layer())
        .layer(middleware::from_fn(preflight_no_content))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { client })
}

/// The CORS layer answers preflights itself with `200`; report them as `204`.
async fn preflight_no_content(req: Request, next: Next) -> Response {
    let is_options = req.method() == Method::OPTIONS;
    let mut resp = next.run(req).await;
    if is_options && resp.status() == StatusCode::OK {
        *resp.status_mut() = StatusCode::NO_CONTENT;
    }
    resp
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(
            ALLOWED_HEADERS
                .iter()
                .copied()
                .map(HeaderName::from_static)
                .collect::<Vec<_>>(),
        )
}

/// Start the web server and run until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the listener fails.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid web server address")?;

    let client = config
        .build_client()
        .context("Failed to build import client")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, strategy = ?config.strategy, "import endpoint listening");

    axum::serve(listener, create_app(client))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
