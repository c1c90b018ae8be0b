use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of perishable stock, in canonical form.
///
/// Field names on the wire match the backing table headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Qty")]
    pub quantity: u64,
    #[serde(rename = "MRP")]
    pub mrp: f64,
    /// `None` when the raw value could not be resolved to a calendar day.
    #[serde(rename = "Expiry")]
    pub expiry: Option<NaiveDate>,
    #[serde(rename = "Shelf Number")]
    pub shelf_number: String,
    #[serde(rename = "Discount %")]
    pub discount_percent: f64,
    #[serde(rename = "Discounted Price")]
    pub discounted_price: f64,
    #[serde(rename = "FlashSale")]
    pub flash_sale: bool,
}

/// Columns of the backing table, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Sku,
    Name,
    Category,
    Qty,
    Mrp,
    Expiry,
    ShelfNumber,
    DiscountPercent,
    DiscountedPrice,
    FlashSale,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::Sku,
        Column::Name,
        Column::Category,
        Column::Qty,
        Column::Mrp,
        Column::Expiry,
        Column::ShelfNumber,
        Column::DiscountPercent,
        Column::DiscountedPrice,
        Column::FlashSale,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Sku => "SKU",
            Column::Name => "Name",
            Column::Category => "Category",
            Column::Qty => "Qty",
            Column::Mrp => "MRP",
            Column::Expiry => "Expiry",
            Column::ShelfNumber => "Shelf Number",
            Column::DiscountPercent => "Discount %",
            Column::DiscountedPrice => "Discounted Price",
            Column::FlashSale => "FlashSale",
        }
    }

    /// Alternate spellings accepted on input (matched case-insensitively).
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Sku => &[],
            Column::Name => &[],
            Column::Category => &[],
            Column::Qty => &["quantity"],
            Column::Mrp => &[],
            Column::Expiry => &[],
            Column::ShelfNumber => &["ShelfNumber"],
            Column::DiscountPercent => &["Discount", "DiscountPercent"],
            Column::DiscountedPrice => &["DiscountedPrice"],
            Column::FlashSale => &["Flash Sale"],
        }
    }

    pub fn matches(self, key: &str) -> bool {
        let key = key.trim();
        key.eq_ignore_ascii_case(self.header())
            || self.aliases().iter().any(|a| key.eq_ignore_ascii_case(a))
    }
}

impl InventoryRecord {
    pub fn headers() -> Vec<&'static str> {
        Column::ALL.iter().map(|c| c.header()).collect()
    }

    /// Cells in header order, as written to the backing table.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.sku.clone(),
            self.name.clone(),
            self.category.clone(),
            self.quantity.to_string(),
            self.mrp.to_string(),
            self.expiry
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            self.shelf_number.clone(),
            self.discount_percent.to_string(),
            format!("{:.2}", self.discounted_price),
            self.flash_sale.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_matches_header_and_aliases_case_insensitively() {
        assert!(Column::ShelfNumber.matches("Shelf Number"));
        assert!(Column::ShelfNumber.matches("shelfnumber"));
        assert!(Column::DiscountPercent.matches("discountPercent"));
        assert!(Column::Sku.matches(" sku "));
        assert!(!Column::Sku.matches("Name"));
    }

    #[test]
    fn to_row_follows_header_order() {
        let record = InventoryRecord {
            sku: "A1".to_string(),
            name: "Milk".to_string(),
            category: "Dairy".to_string(),
            quantity: 4,
            mrp: 100.0,
            expiry: NaiveDate::from_ymd_opt(2025, 6, 22),
            shelf_number: "S3".to_string(),
            discount_percent: 20.0,
            discounted_price: 80.0,
            flash_sale: true,
        };

        let row = record.to_row();
        assert_eq!(row.len(), InventoryRecord::headers().len());
        assert_eq!(
            row,
            vec!["A1", "Milk", "Dairy", "4", "100", "2025-06-22", "S3", "20", "80.00", "true"]
        );
    }

    #[test]
    fn serializes_with_table_headers() {
        let record = InventoryRecord {
            sku: "A1".to_string(),
            name: "Milk".to_string(),
            category: String::new(),
            quantity: 0,
            mrp: 10.0,
            expiry: None,
            shelf_number: String::new(),
            discount_percent: 0.0,
            discounted_price: 10.0,
            flash_sale: false,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["SKU"], "A1");
        assert_eq!(json["Discount %"], 0.0);
        assert!(json["Expiry"].is_null());
        assert_eq!(json["FlashSale"], false);
    }
}
