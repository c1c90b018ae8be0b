//! Record Normalizer: raw table rows to canonical inventory records.
//!
//! Date resolution is applied the same way for every caller:
//!
//! 1. a number, or text holding only a number, is a spreadsheet serial day
//!    count after `1899-12-30` (fraction discarded);
//! 2. `YYYY-MM-DD` (also `YYYY/MM/DD`) or an RFC 3339 timestamp;
//! 3. day-first `DD-MM-YYYY` (also `/` and `.` separators);
//! 4. anything else is left unresolved.
//!
//! Optional fields never fail; they fall back to defaults.

use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::warn;

use crate::inventory::raw::{RawRow, RawValue};
use crate::models::inventory::{Column, InventoryRecord};

/// Largest serial a spreadsheet can hold (9999-12-31).
const MAX_SERIAL: f64 = 2_958_465.0;

/// Converts a spreadsheet serial day count to a calendar day.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=MAX_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial.floor() as u64))
}

/// Resolves a raw expiry cell per the module-level policy.
pub fn parse_date(value: &RawValue) -> Option<NaiveDate> {
    match value {
        RawValue::Number(serial) => serial_to_date(*serial),
        RawValue::Text(text) => parse_date_str(text),
        RawValue::Empty | RawValue::Bool(_) => None,
    }
}

/// Resolves a date given as text (table cell or request parameter).
pub fn parse_date_str(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(serial) = text.parse::<f64>() {
        return serial_to_date(serial);
    }

    if text.contains('T') {
        return DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive());
    }

    let parts: Vec<&str> = text.split(['-', '/', '.']).collect();
    let all_digits = |p: &&str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    if parts.len() != 3 || !parts.iter().all(all_digits) {
        return None;
    }

    let num = |s: &str| s.parse::<u32>().ok();
    match (parts[0].len(), parts[2].len()) {
        (4, 1..=2) if !text.contains('.') => {
            NaiveDate::from_ymd_opt(num(parts[0])? as i32, num(parts[1])?, num(parts[2])?)
        }
        (1..=2, 4) => {
            NaiveDate::from_ymd_opt(num(parts[2])? as i32, num(parts[1])?, num(parts[0])?)
        }
        _ => None,
    }
}

/// Rounds half-up to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// `mrp * (1 - discount/100)`, rounded to cents.
pub fn discounted_price(mrp: f64, discount_percent: f64) -> f64 {
    round2(mrp * (1.0 - discount_percent / 100.0))
}

/// Converts one raw row into a canonical record.
pub fn normalize(row: &RawRow) -> InventoryRecord {
    let text = |column: Column| row.get(column).as_text().unwrap_or_default();

    let sku = text(Column::Sku);
    let raw_expiry = row.get(Column::Expiry);
    let expiry = parse_date(raw_expiry);
    if expiry.is_none() && *raw_expiry != RawValue::Empty {
        warn!(%sku, raw = ?raw_expiry, "Unresolved expiry date");
    }

    let quantity = row
        .get(Column::Qty)
        .as_number()
        .filter(|q| *q >= 0.0)
        .map_or(0, |q| q.trunc() as u64);
    let mrp = row
        .get(Column::Mrp)
        .as_number()
        .filter(|m| *m >= 0.0)
        .unwrap_or(0.0);
    let discount_percent =
        clamp_percent(row.get(Column::DiscountPercent).as_number().unwrap_or(0.0));

    InventoryRecord {
        name: text(Column::Name),
        category: text(Column::Category),
        quantity,
        mrp,
        expiry,
        shelf_number: text(Column::ShelfNumber),
        discount_percent,
        discounted_price: discounted_price(mrp, discount_percent),
        flash_sale: row.get(Column::FlashSale).is_truthy(),
        sku,
    }
}
