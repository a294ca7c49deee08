mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::location::DictionaryStore;
pub use state::AppState;

pub fn build_router(store: DictionaryStore, parallel: bool) -> Router {
    let state = Arc::new(AppState { store, parallel });

    Router::new()
        .route(
            "/api/resolve",
            get(handlers::resolve).post(handlers::resolve_batch),
        )
        .route("/api/dictionary", get(handlers::dictionary_stats))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(store: DictionaryStore, parallel: bool, host: &str, port: u16) -> std::io::Result<()> {
    let app = build_router(store, parallel);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("geoloc server listening on http://{}", addr);
    axum::serve(listener, app).await
}
