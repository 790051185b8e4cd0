//! Axum application setup.

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::handlers;
use super::state::AppState;

/// Routes under `/api`: ask, query and health.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api = Router::new()
        .route("/ask", post(handlers::ask))
        .route("/query", post(handlers::query))
        .route("/health", get(handlers::health));

    Router::new().nest("/api", api).layer(cors).with_state(state)
}

/// Bind to localhost and serve until the process is stopped.
pub async fn run_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "server listening");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
