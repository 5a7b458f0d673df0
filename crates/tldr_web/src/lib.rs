use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/summarize", post(handlers::summarize))
        .route("/api/cache", delete(handlers::clear_cache))
        .route("/api/models", get(handlers::list_models))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> tldr_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌍 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use tldr_core::{Error, Result};
}
