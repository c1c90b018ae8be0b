// src/handlers/inventory.rs
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use chrono::Utc;
use serde_json::Value;
use tracing::{error, instrument};

use crate::dtos::inventory::{CreateItemResponse, ExpiringByDateQuery, InventoryItemResponse};
use crate::error::AppError;
use crate::inventory::RawRow;
use crate::state::AppState;

// GET /api/inventory - Full table
#[instrument(skip(state))]
pub async fn list_inventory(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryItemResponse>>, AppError> {
    match state.inventory.list() {
        Ok(records) => Ok(Json(InventoryItemResponse::list(records, Utc::now().date_naive()))),
        Err(e) => {
            error!(error = %e, "Failed to load inventory");
            Err(e)
        }
    }
}

// POST /api/inventory - Insert one item
#[instrument(skip(state, payload))]
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CreateItemResponse>, AppError> {
    let Json(payload) = payload?;
    if !payload.is_object() {
        return Err(AppError::validation("Item must be a JSON object"));
    }

    let record = state.inventory.insert(&RawRow::from_json(&payload))?;

    Ok(Json(CreateItemResponse {
        message: "Item added successfully!".to_string(),
        item: InventoryItemResponse::new(record, Utc::now().date_naive()),
    }))
}

// GET /api/expiring - Flash-sale items expiring within the alert window
#[instrument(skip(state))]
pub async fn list_expiring(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryItemResponse>>, AppError> {
    let today = Utc::now().date_naive();
    let records = state.inventory.expiring_soon(today)?;

    Ok(Json(InventoryItemResponse::list(records, today)))
}

// GET /api/expiring/by-date?date=YYYY-MM-DD&days=N
#[instrument(skip(state))]
pub async fn list_expiring_by_date(
    State(state): State<AppState>,
    Query(params): Query<ExpiringByDateQuery>,
) -> Result<Json<Vec<InventoryItemResponse>>, AppError> {
    let date = params
        .date
        .ok_or_else(|| AppError::invalid_input("Missing 'date' query parameter"))?;
    let records = state.inventory.expiring_by_date(&date, params.days)?;

    Ok(Json(InventoryItemResponse::list(records, Utc::now().date_naive())))
}
