// src/handlers/flash_sale.rs
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::dtos::flash_sale::{FlashSaleUpdateItem, FlashSaleUpdateResponse};
use crate::dtos::inventory::InventoryItemResponse;
use crate::error::AppError;
use crate::inventory::DiscountUpdate;
use crate::state::AppState;

// GET /api/flash-sale - Full table for the flash-sale editor
#[instrument(skip(state))]
pub async fn get_flash_sale(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryItemResponse>>, AppError> {
    let records = state.inventory.flash_sale_view()?;
    Ok(Json(InventoryItemResponse::list(records, Utc::now().date_naive())))
}

// POST /api/flash-sale/update - Apply [{ SKU, Discount % }]
#[instrument(skip(state, payload))]
pub async fn update_flash_sale(
    State(state): State<AppState>,
    payload: Result<Json<Vec<FlashSaleUpdateItem>>, JsonRejection>,
) -> Result<Json<FlashSaleUpdateResponse>, AppError> {
    let Json(payload) = payload?;
    let updates: Vec<DiscountUpdate> = payload.into_iter().map(DiscountUpdate::from).collect();
    debug!(count = updates.len(), "Received flash sale updates");
    let summary = state.inventory.apply_flash_sale_updates(&updates)?;

    if !summary.skipped.is_empty() {
        info!(skipped = ?summary.skipped, "Flash sale updates referenced unknown SKUs");
    }

    Ok(Json(FlashSaleUpdateResponse::from(summary)))
}
