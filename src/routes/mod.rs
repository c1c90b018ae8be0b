pub mod flash_sale;
pub mod inventory;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(inventory::routes())
        .merge(flash_sale::routes())
}

/// Full application: API under `/api`, liveness at `/health`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", create_router())
        .route("/", get(|| async { "FreshStock API" }))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
