use axum::{routing::get, Router};

use crate::handlers::inventory::{create_item, list_expiring, list_expiring_by_date, list_inventory};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/inventory", get(list_inventory).post(create_item))
        .route("/expiring", get(list_expiring))
        .route("/expiring/by-date", get(list_expiring_by_date))
}
