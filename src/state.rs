// src/state.rs
use std::sync::Arc;

use crate::inventory::{CsvStore, InventoryService};

#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<InventoryService<CsvStore>>,
}

impl AppState {
    pub fn new(inventory: InventoryService<CsvStore>) -> Self {
        Self {
            inventory: Arc::new(inventory),
        }
    }
}
