// src/dtos/inventory.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::inventory::expiry::days_left;
use crate::models::inventory::InventoryRecord;

#[derive(Debug, Serialize)]
pub struct InventoryItemResponse {
    #[serde(flatten)]
    pub record: InventoryRecord,
    /// Not stored; computed against the current date on every response.
    #[serde(rename = "Days Left")]
    pub days_left: Option<i64>,
}

impl InventoryItemResponse {
    pub fn new(record: InventoryRecord, today: NaiveDate) -> Self {
        let days_left = days_left(&record, today);
        Self { record, days_left }
    }

    pub fn list(records: Vec<InventoryRecord>, today: NaiveDate) -> Vec<Self> {
        records.into_iter().map(|r| Self::new(r, today)).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct CreateItemResponse {
    pub message: String,
    pub item: InventoryItemResponse,
}

#[derive(Debug, Deserialize)]
pub struct ExpiringByDateQuery {
    pub date: Option<String>,
    pub days: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_left_is_flattened_next_to_record_fields() {
        let record = InventoryRecord {
            sku: "A1".to_string(),
            name: "Milk".to_string(),
            category: "Dairy".to_string(),
            quantity: 2,
            mrp: 50.0,
            expiry: NaiveDate::from_ymd_opt(2025, 6, 25),
            shelf_number: "S1".to_string(),
            discount_percent: 0.0,
            discounted_price: 50.0,
            flash_sale: false,
        };

        let today = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        let json = serde_json::to_value(InventoryItemResponse::new(record, today)).unwrap();

        assert_eq!(json["SKU"], "A1");
        assert_eq!(json["Expiry"], "2025-06-25");
        assert_eq!(json["Days Left"], 5);
    }
}
