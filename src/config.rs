// src/config.rs
use std::net::IpAddr;
use std::path::PathBuf;

use crate::inventory::expiry::{DEFAULT_ALERT_DAYS, DEFAULT_LOOKUP_DAYS};

/// Horizons for the two expiry queries, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryWindows {
    pub alert_days: i64,
    pub lookup_days: i64,
}

impl Default for ExpiryWindows {
    fn default() -> Self {
        Self {
            alert_days: DEFAULT_ALERT_DAYS,
            lookup_days: DEFAULT_LOOKUP_DAYS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub inventory_file: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub windows: ExpiryWindows,
}

impl AppConfig {
    /// Reads `INVENTORY_FILE`, `HOST`, `PORT`, `EXPIRY_ALERT_DAYS` and
    /// `EXPIRY_LOOKUP_DAYS` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let windows = ExpiryWindows {
            alert_days: parse_or("EXPIRY_ALERT_DAYS", &lookup, DEFAULT_ALERT_DAYS, |d| *d >= 0),
            lookup_days: parse_or("EXPIRY_LOOKUP_DAYS", &lookup, DEFAULT_LOOKUP_DAYS, |d| *d >= 0),
        };

        Self {
            inventory_file: lookup("INVENTORY_FILE")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("inventory.csv")),
            host: parse_or("HOST", &lookup, IpAddr::from([127, 0, 0, 1]), |_| true),
            port: parse_or("PORT", &lookup, 3000, |_| true),
            windows,
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
    valid: impl Fn(&T) -> bool,
) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        _ => {
            tracing::warn!(%key, value = %raw, "Ignoring invalid setting, using default");
            default
        }
    }
}
