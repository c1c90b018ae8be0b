//! Discount Update Engine.

use serde::Serialize;
use tracing::debug;

use crate::inventory::normalizer::{clamp_percent, discounted_price};
use crate::models::inventory::InventoryRecord;

/// One requested change: put `sku` on flash sale at `discount_percent`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountUpdate {
    pub sku: String,
    pub discount_percent: f64,
}

impl DiscountUpdate {
    pub fn new(sku: impl Into<String>, discount_percent: f64) -> Self {
        Self {
            sku: sku.into(),
            discount_percent,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiscountSummary {
    pub applied: usize,
    /// SKUs that matched no record, in request order.
    pub skipped: Vec<String>,
}

/// Applies `updates` in order to the first record with a matching SKU.
///
/// Unmatched or blank SKUs are skipped without error. A later update to the
/// same SKU overrides an earlier one. Persisting the result is up to the caller.
pub fn apply_discounts(
    records: &mut [InventoryRecord],
    updates: &[DiscountUpdate],
) -> DiscountSummary {
    let mut summary = DiscountSummary::default();

    for update in updates {
        let matched = if update.sku.trim().is_empty() {
            None
        } else {
            records.iter_mut().find(|r| r.sku == update.sku)
        };
        let Some(record) = matched else {
            debug!(sku = %update.sku, "No record for flash sale update, skipping");
            summary.skipped.push(update.sku.clone());
            continue;
        };

        record.discount_percent = clamp_percent(update.discount_percent);
        record.discounted_price = discounted_price(record.mrp, record.discount_percent);
        record.flash_sale = true;
        summary.applied += 1;
    }

    summary
}
