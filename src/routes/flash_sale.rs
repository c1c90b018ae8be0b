use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::flash_sale::{get_flash_sale, update_flash_sale};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flash-sale", get(get_flash_sale))
        .route("/flash-sale/update", post(update_flash_sale))
}
