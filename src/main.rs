//! bidwatch — live item detail page for the collectibles auction service.
//!
//! Loads an item and its bids from the auction API, renders the page to
//! the terminal, keeps the displayed price fresh from the price-update
//! socket, and submits offers typed at the prompt.
//!
//! Usage:
//!   cargo run -- <item-id>
//!
//! Commands at the prompt:
//!   offer <amount> <name> <email>    submit a bid
//!   offers                           re-fetch and re-render the bid list
//!   load                             re-fetch and re-render the whole page
//!   quit                             exit

use anyhow::{bail, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use bidwatch::api::ApiClient;
use bidwatch::config::Config;
use bidwatch::live::{LiveEvent, PriceFeed};
use bidwatch::model::OfferForm;
use bidwatch::page::ItemPage;
use bidwatch::view;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = if std::path::Path::new("bidwatch.toml").exists() {
        Config::load(std::path::Path::new("bidwatch.toml"))?
    } else {
        Config::from_env()
    };

    init_tracing(&config);

    info!("bidwatch v{} starting", env!("CARGO_PKG_VERSION"));

    // The item id selects the page; without one there is nothing to show.
    let item_id = match std::env::args().nth(1) {
        Some(id) if !id.is_empty() => id,
        _ => bail!("no item id provided (usage: bidwatch <item-id>)"),
    };

    let api = ApiClient::new(config.service.base_url.clone());
    let mut page = ItemPage::new(api, item_id);

    // --- Live-Update Listener ---
    let (live_tx, mut live_rx) = mpsc::unbounded_channel::<LiveEvent>();
    let ws_url = config.service.price_updates_url()?;
    PriceFeed::new(ws_url, live_tx).spawn();

    // --- Initial load ---
    match page.load().await {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => print!("{}", view::render_error_banner(&e.to_string())),
    }
    println!("\ncommands: offer <amount> <name> <email> | offers | load | help | quit");

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(event) = live_rx.recv() => {
                match event {
                    LiveEvent::Connected => info!("price-update feed connected"),
                    LiveEvent::Disconnected => {
                        warn!("price-update feed closed; displayed price may go stale");
                    }
                    LiveEvent::Price(update) => {
                        if let Some(price_line) = page.apply_price_update(&update) {
                            println!("[live] {price_line}");
                        }
                    }
                }
            }

            line = input.next_line() => {
                let line = match line {
                    Ok(Some(l)) => l,
                    Ok(None) | Err(_) => break,
                };
                if !handle_command(line.trim(), &mut page).await {
                    break;
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("shutting down...");
                break;
            }
        }
    }

    Ok(())
}

/// Dispatch one prompt line. Returns false when the operator asked to quit.
async fn handle_command(line: &str, page: &mut ItemPage) -> bool {
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => true,

        Some("quit") | Some("exit") => false,

        Some("help") => {
            println!("commands: offer <amount> <name> <email> | offers | load | help | quit");
            true
        }

        Some("load") => {
            match page.load().await {
                Ok(rendered) => print!("{rendered}"),
                Err(e) => print!("{}", view::render_error_banner(&e.to_string())),
            }
            true
        }

        Some("offers") => {
            match page.refresh_offers().await {
                Ok(list) => {
                    println!("Current Bids");
                    print!("{list}");
                }
                Err(e) => print!("{}", view::render_error_banner(&e.to_string())),
            }
            true
        }

        Some("offer") => {
            let (amount, name, email) = match (parts.next(), parts.next(), parts.next()) {
                (Some(a), Some(n), Some(e)) => (a, n, e),
                _ => {
                    println!("usage: offer <amount> <name> <email>");
                    return true;
                }
            };
            let form = OfferForm {
                offer_amount: amount.to_string(),
                bidder_name: name.to_string(),
                bidder_email: email.to_string(),
            };

            println!("Submitting...");
            match page.submit(&form).await {
                Ok(outcome) => {
                    println!("{}", outcome.message);
                    println!("Current Bids");
                    print!("{}", outcome.offers_view);
                }
                // Covers rejections, network failures, and bad payloads alike.
                Err(e) => println!("Error: {e}"),
            }
            true
        }

        Some(other) => {
            println!("unknown command: {other} (try help)");
            true
        }
    }
}

fn init_tracing(config: &Config) {
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
}
