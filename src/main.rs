// src/main.rs
use std::net::SocketAddr;

use dotenvy::dotenv;
use freshstock::inventory::{CsvStore, InventoryService};
use freshstock::{routes, state::AppState, AppConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();

    // Backing table, created header-only on first run
    let store = CsvStore::new(&config.inventory_file);
    if let Err(e) = store.ensure_exists() {
        tracing::error!(error = %e, "Failed to prepare inventory table");
        return;
    }
    tracing::info!(path = %store.path().display(), "Using inventory table");

    // Create application state
    let app_state = AppState::new(InventoryService::new(store, config.windows));
    let app = routes::app(app_state);

    // Try base_port..base_port+20 to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = config.port.saturating_add(offset);
            let addr = SocketAddr::from((config.host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => { bound = Some((l, addr)); break; }
                Err(e) => {
                    if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Server running on {}", addr);
                l
            }
            None => {
                tracing::error!("Failed to bind to any port starting at {} on {}", config.port, config.host);
                return;
            }
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
    }
}
