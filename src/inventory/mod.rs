pub mod discount;
pub mod expiry;
pub mod normalizer;
pub mod raw;
pub mod service;
pub mod store;

pub use discount::{apply_discounts, DiscountSummary, DiscountUpdate};
pub use raw::{RawRow, RawValue};
pub use service::InventoryService;
pub use store::{CsvStore, InventoryStore};
