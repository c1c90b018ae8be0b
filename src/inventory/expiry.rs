//! Expiry Query Engine.
//!
//! Two windows, both inclusive on each bound:
//!
//! - relative (`expiring_soon`): shelf alerts, only items already on flash
//!   sale;
//! - absolute (`expiring_by_date`): general lookup from a chosen date, flash
//!   sale not required.
//!
//! Records without a resolved expiry never match either window.

use chrono::{NaiveDate, NaiveTime};

use crate::error::AppError;
use crate::inventory::normalizer::parse_date_str;
use crate::models::inventory::InventoryRecord;

pub const DEFAULT_ALERT_DAYS: i64 = 3;
pub const DEFAULT_LOOKUP_DAYS: i64 = 15;

const MS_PER_DAY: i64 = 86_400_000;

/// Whole days from `from` to `to`: UTC millisecond difference, floored.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let millis = |d: NaiveDate| d.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
    (millis(to) - millis(from)).div_euclid(MS_PER_DAY)
}

/// Signed days left before `record` expires, seen from `reference`.
pub fn days_left(record: &InventoryRecord, reference: NaiveDate) -> Option<i64> {
    record.expiry.map(|expiry| days_between(reference, expiry))
}

fn within(record: &InventoryRecord, reference: NaiveDate, horizon_days: i64) -> bool {
    days_left(record, reference).is_some_and(|d| (0..=horizon_days).contains(&d))
}

/// Flash-sale items expiring between `reference` and `reference + horizon_days`.
pub fn expiring_soon(
    records: &[InventoryRecord],
    reference: NaiveDate,
    horizon_days: i64,
) -> Vec<InventoryRecord> {
    records
        .iter()
        .filter(|r| r.flash_sale && within(r, reference, horizon_days))
        .cloned()
        .collect()
}

/// Items expiring between `selected` and `selected + horizon_days`.
pub fn expiring_by_date(
    records: &[InventoryRecord],
    selected: NaiveDate,
    horizon_days: i64,
) -> Vec<InventoryRecord> {
    records
        .iter()
        .filter(|r| within(r, selected, horizon_days))
        .cloned()
        .collect()
}

/// Parses a caller-supplied date with the same policy used for stored rows.
pub fn parse_selected_date(raw: &str) -> Result<NaiveDate, AppError> {
    parse_date_str(raw).ok_or_else(|| AppError::invalid_input(format!("Invalid date: '{raw}'")))
}
