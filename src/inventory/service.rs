//! Request-shaped inventory operations.
//!
//! Each call is load, pure transform, and for mutations a whole-table save,
//! all under one per-store lock so concurrent requests cannot lose updates.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::ExpiryWindows;
use crate::error::AppError;
use crate::inventory::discount::{apply_discounts, DiscountSummary, DiscountUpdate};
use crate::inventory::expiry::{expiring_by_date, expiring_soon, parse_selected_date};
use crate::inventory::normalizer::normalize;
use crate::inventory::raw::RawRow;
use crate::inventory::store::InventoryStore;
use crate::models::inventory::{Column, InventoryRecord};

const REQUIRED: [Column; 3] = [Column::Sku, Column::Name, Column::Expiry];

pub struct InventoryService<S> {
    store: S,
    lock: Mutex<()>,
    windows: ExpiryWindows,
}

impl<S: InventoryStore> InventoryService<S> {
    pub fn new(store: S, windows: ExpiryWindows) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
            windows,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // Guards no data, so a poisoned lock is still usable
    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Full table in source order.
    pub fn list(&self) -> Result<Vec<InventoryRecord>, AppError> {
        let _guard = self.guard();
        Ok(self.store.load()?)
    }

    /// Full table for the flash-sale editor; same rows as [`Self::list`].
    pub fn flash_sale_view(&self) -> Result<Vec<InventoryRecord>, AppError> {
        self.list()
    }

    /// Validates, defaults and appends one candidate row, then saves.
    ///
    /// Nothing is written when validation or the uniqueness check fails.
    pub fn insert(&self, candidate: &RawRow) -> Result<InventoryRecord, AppError> {
        let record = validate_candidate(candidate)?;

        let _guard = self.guard();
        let mut records = self.store.load()?;
        if records.iter().any(|r| r.sku == record.sku) {
            return Err(AppError::conflict(format!(
                "SKU '{}' already exists",
                record.sku
            )));
        }

        records.push(record.clone());
        self.store.save(&records)?;
        info!(sku = %record.sku, "Inserted inventory item");
        Ok(record)
    }

    /// Flash-sale items expiring within the alert window from `today`.
    pub fn expiring_soon(&self, today: NaiveDate) -> Result<Vec<InventoryRecord>, AppError> {
        let records = self.list()?;
        Ok(expiring_soon(&records, today, self.windows.alert_days))
    }

    /// Items expiring within `days` (default lookup window) of `selected_date`.
    pub fn expiring_by_date(
        &self,
        selected_date: &str,
        days: Option<i64>,
    ) -> Result<Vec<InventoryRecord>, AppError> {
        let selected = parse_selected_date(selected_date)?;
        let horizon = match days {
            Some(d) if d < 0 => {
                return Err(AppError::invalid_input(format!(
                    "Window must not be negative: {d}"
                )))
            }
            Some(d) => d,
            None => self.windows.lookup_days,
        };

        let records = self.list()?;
        Ok(expiring_by_date(&records, selected, horizon))
    }

    /// Applies a batch of discounts and saves when anything matched.
    pub fn apply_flash_sale_updates(
        &self,
        updates: &[DiscountUpdate],
    ) -> Result<DiscountSummary, AppError> {
        let _guard = self.guard();
        let mut records = self.store.load()?;
        let summary = apply_discounts(&mut records, updates);

        if summary.applied > 0 {
            self.store.save(&records)?;
        }
        debug!(
            applied = summary.applied,
            skipped = summary.skipped.len(),
            "Applied flash sale updates"
        );
        Ok(summary)
    }
}

fn validate_candidate(candidate: &RawRow) -> Result<InventoryRecord, AppError> {
    let missing: Vec<&str> = REQUIRED
        .iter()
        .filter(|c| candidate.get(**c).as_text().is_none())
        .map(|c| c.header())
        .collect();
    if !missing.is_empty() {
        return Err(AppError::validation(format!(
            "Missing required field(s): {}",
            missing.join(", ")
        )));
    }

    let mut record = normalize(candidate);
    if record.expiry.is_none() {
        return Err(AppError::validation(format!(
            "Expiry is not a recognised date: {:?}",
            candidate.get(Column::Expiry).as_text().unwrap_or_default()
        )));
    }

    record.flash_sale = false;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::store::memory::MemoryStore;
    use serde_json::json;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service() -> InventoryService<MemoryStore> {
        let rows = [
            json!({ "SKU": "A1", "Name": "Milk", "MRP": 100, "Expiry": "2025-06-22", "FlashSale": true }),
            json!({ "SKU": "B2", "Name": "Curd", "MRP": 40, "Expiry": "2025-06-22" }),
            json!({ "SKU": "C3", "Name": "Butter", "MRP": 250, "Expiry": "2025-07-05" }),
        ];
        let records = rows.iter().map(|r| normalize(&RawRow::from_json(r))).collect();
        InventoryService::new(MemoryStore::with_records(records), ExpiryWindows::default())
    }

    #[test]
    fn insert_defaults_and_persists() {
        let service = service();
        let candidate = RawRow::from_json(&json!({
            "SKU": "D4",
            "Name": "Ghee",
            "Qty": "7",
            "MRP": "600",
            "Expiry": "01-08-2025",
            "Discount %": 10,
            "Discounted Price": 1,
            "FlashSale": true
        }));

        let record = service.insert(&candidate).unwrap();

        assert_eq!(record.expiry, Some(ymd(2025, 8, 1)));
        assert_eq!(record.quantity, 7);
        assert_eq!(record.discounted_price, 540.0);
        assert!(!record.flash_sale);
        assert_eq!(service.store().saves(), 1);
        assert_eq!(service.list().unwrap().last(), Some(&record));
    }

    #[test]
    fn duplicate_sku_is_conflict_without_save() {
        let service = service();
        let candidate = RawRow::from_json(&json!({ "SKU": "A1", "Name": "Milk", "Expiry": "2025-09-01" }));

        let err = service.insert(&candidate).unwrap_err();

        assert!(matches!(err, AppError::ConflictError(_)));
        assert_eq!(service.store().saves(), 0);
        assert_eq!(service.list().unwrap().len(), 3);
    }

    #[test]
    fn missing_required_fields_are_validation_errors() {
        let service = service();
        let candidate = RawRow::from_json(&json!({ "SKU": "E5", "Name": "  " }));

        let err = service.insert(&candidate).unwrap_err();

        match err {
            AppError::ValidationError(msg) => {
                assert!(msg.contains("Name"));
                assert!(msg.contains("Expiry"));
                assert!(!msg.contains("SKU"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(service.store().saves(), 0);
    }

    #[test]
    fn unresolvable_expiry_on_insert_is_rejected() {
        let service = service();
        let candidate = RawRow::from_json(&json!({ "SKU": "E5", "Name": "Whey", "Expiry": "soon" }));

        assert!(matches!(
            service.insert(&candidate),
            Err(AppError::ValidationError(_))
        ));
        assert_eq!(service.store().saves(), 0);
    }

    #[test]
    fn expiring_soon_uses_alert_window() {
        let found = service().expiring_soon(ymd(2025, 6, 20)).unwrap();
        let skus: Vec<_> = found.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(skus, vec!["A1"]);
    }

    #[test]
    fn expiring_by_date_default_and_custom_window() {
        let service = service();

        let found = service.expiring_by_date("2025-06-20", None).unwrap();
        assert_eq!(found.len(), 3);

        let found = service.expiring_by_date("20-06-2025", Some(2)).unwrap();
        let skus: Vec<_> = found.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(skus, vec!["A1", "B2"]);
    }

    #[test]
    fn expiring_by_date_rejects_bad_input() {
        let service = service();
        assert!(matches!(
            service.expiring_by_date("not-a-date", None),
            Err(AppError::InvalidInputError(_))
        ));
        assert!(matches!(
            service.expiring_by_date("2025-06-20", Some(-1)),
            Err(AppError::InvalidInputError(_))
        ));
    }

    #[test]
    fn flash_sale_updates_persist_matches_only() {
        let service = service();

        let summary = service
            .apply_flash_sale_updates(&[DiscountUpdate::new("B2", 25.0), DiscountUpdate::new("nope", 5.0)])
            .unwrap();

        assert_eq!(summary.applied, 1);
        assert_eq!(summary.skipped, vec!["nope".to_string()]);
        assert_eq!(service.store().saves(), 1);

        let b2 = service.list().unwrap().into_iter().find(|r| r.sku == "B2").unwrap();
        assert_eq!(b2.discounted_price, 30.0);
        assert!(b2.flash_sale);
    }

    #[test]
    fn unmatched_batch_saves_nothing() {
        let service = service();
        let before = service.list().unwrap();

        let summary = service
            .apply_flash_sale_updates(&[DiscountUpdate::new("nope", 5.0)])
            .unwrap();

        assert_eq!(summary.applied, 0);
        assert_eq!(service.store().saves(), 0);
        assert_eq!(service.list().unwrap(), before);
    }

    #[test]
    fn panicked_holder_does_not_wedge_the_store() {
        let service = service();

        std::thread::scope(|scope| {
            let held = scope.spawn(|| {
                let _guard = service.lock.lock().unwrap();
                panic!("request handler panicked mid-update");
            });
            assert!(held.join().is_err());
        });
        assert!(service.lock.is_poisoned());

        assert_eq!(service.list().unwrap().len(), 3);
        let candidate = RawRow::from_json(&json!({ "SKU": "E5", "Name": "Paneer", "Expiry": "2025-08-01" }));
        service.insert(&candidate).unwrap();
        assert_eq!(service.store().saves(), 1);
    }
}
