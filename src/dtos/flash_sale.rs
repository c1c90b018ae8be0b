// src/dtos/flash_sale.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::inventory::{DiscountSummary, DiscountUpdate, RawValue};

/// One entry of a flash-sale update batch, as sent by the editor.
#[derive(Debug, Deserialize)]
pub struct FlashSaleUpdateItem {
    #[serde(rename = "SKU", alias = "sku", default)]
    pub sku: Value,
    #[serde(rename = "Discount %", alias = "discountPercent", default)]
    pub discount_percent: Value,
}

impl From<FlashSaleUpdateItem> for DiscountUpdate {
    fn from(item: FlashSaleUpdateItem) -> Self {
        DiscountUpdate::new(
            RawValue::from_json(&item.sku).as_text().unwrap_or_default(),
            RawValue::from_json(&item.discount_percent)
                .as_number()
                .unwrap_or(0.0),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct FlashSaleUpdateResponse {
    pub message: String,
    pub applied: usize,
    pub skipped: Vec<String>,
}

impl From<DiscountSummary> for FlashSaleUpdateResponse {
    fn from(summary: DiscountSummary) -> Self {
        Self {
            message: "Flash Sale updated".to_string(),
            applied: summary.applied,
            skipped: summary.skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_table_and_camel_case_keys() {
        let items: Vec<FlashSaleUpdateItem> = serde_json::from_value(json!([
            { "SKU": "A1", "Discount %": "20" },
            { "sku": 1001, "discountPercent": 12.5 },
            { "SKU": "C3", "Discount %": "lots" },
            { "SKU": "D4" }
        ]))
        .unwrap();

        let updates: Vec<DiscountUpdate> = items.into_iter().map(DiscountUpdate::from).collect();
        assert_eq!(
            updates,
            vec![
                DiscountUpdate::new("A1", 20.0),
                DiscountUpdate::new("1001", 12.5),
                DiscountUpdate::new("C3", 0.0),
                DiscountUpdate::new("D4", 0.0),
            ]
        );
    }
}
