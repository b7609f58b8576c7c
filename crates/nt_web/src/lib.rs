use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod error;
pub mod geocoding;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use geocoding::{NominatimGeocoder, StaticGeocoder};
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/news", post(handlers::location_news))
        .route("/news/structured", post(handlers::structured_location_news))
        .route("/test-news", get(handlers::test_news))
        .route("/test-news/structured", get(handlers::test_structured_news))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Serves the API until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> nt_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use nt_core::{Error, NewsArticle, ParseResult, Result};
}
