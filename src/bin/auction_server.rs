//! Auction backend for the bidwatch item page.
//!
//! Serves the item and offer APIs, accepts offer form posts, and pushes
//! PRICE_UPDATE frames to every subscriber on /ws/price-updates.
//!
//! Usage:
//!   cargo run --bin auction_server

use std::path::Path;

use anyhow::Result;
use tracing::info;

use bidwatch::config::Config;
use bidwatch::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let config = if Path::new("bidwatch.toml").exists() {
        Config::load(Path::new("bidwatch.toml"))?
    } else {
        Config::from_env()
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));
    if config.logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .init();
    }

    info!("auction server v{} starting", env!("CARGO_PKG_VERSION"));

    let state = AppState::from_items_file(Path::new(&config.server.items_path))?;
    server::serve(state, &config.server.bind).await
}
