//! FreshStock: perishable-goods inventory over a single CSV table.
//!
//! Stock rows are normalized on load, queried by expiry window, discounted in
//! flash-sale batches and written back as a whole table.

pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod inventory;
pub mod models;
pub mod routes;
pub mod state;

pub use config::{AppConfig, ExpiryWindows};
pub use error::{AppError, StorageError};
pub use models::inventory::InventoryRecord;
