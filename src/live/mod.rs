//! Live price-update listener.
//!
//! Opens the price-update WebSocket once and forwards every parsed message
//! to the page event loop. The connection has exactly two states, connected
//! and closed: when the socket drops, the task ends and updates are lost
//! until the next page view. The client never sends application frames.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info};

use crate::model::{LiveMessage, PriceUpdate};

/// Events surfaced to the page event loop.
#[derive(Debug, Clone)]
pub enum LiveEvent {
    Connected,
    Disconnected,
    Price(PriceUpdate),
}

/// Price-update WebSocket listener for one page view.
pub struct PriceFeed {
    ws_url: String,
    event_tx: mpsc::UnboundedSender<LiveEvent>,
}

impl PriceFeed {
    pub fn new(ws_url: String, event_tx: mpsc::UnboundedSender<LiveEvent>) -> Self {
        Self { ws_url, event_tx }
    }

    /// Spawn the listener task. It runs until the socket closes or errors.
    pub fn spawn(self) {
        tokio::spawn(async move {
            run_price_feed(self.ws_url, self.event_tx).await;
        });
    }
}

async fn run_price_feed(ws_url: String, event_tx: mpsc::UnboundedSender<LiveEvent>) {
    info!(url = %ws_url, "connecting to price-update socket");

    match connect_and_stream(&ws_url, &event_tx).await {
        Ok(()) => info!("price-update socket closed"),
        Err(e) => error!(error = %e, "price-update socket error"),
    }

    let _ = event_tx.send(LiveEvent::Disconnected);
}

async fn connect_and_stream(
    ws_url: &str,
    event_tx: &mpsc::UnboundedSender<LiveEvent>,
) -> Result<(), tokio_tungstenite::tungstenite::Error> {
    let (ws_stream, _) = connect_async(ws_url).await?;
    let (mut write, mut read) = ws_stream.split();

    info!("price-update socket connected");
    let _ = event_tx.send(LiveEvent::Connected);

    while let Some(msg_result) = read.next().await {
        match msg_result {
            Ok(Message::Text(text)) => {
                process_message(&text, event_tx);
            }
            Ok(Message::Ping(data)) => {
                let _ = write.send(Message::Pong(data)).await;
            }
            Ok(Message::Close(frame)) => {
                info!(frame = ?frame, "price-update socket close frame");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "price-update socket read error");
                break;
            }
        }
    }

    Ok(())
}

fn process_message(text: &str, event_tx: &mpsc::UnboundedSender<LiveEvent>) {
    match serde_json::from_str::<LiveMessage>(text) {
        Ok(LiveMessage::PriceUpdate(update)) => {
            debug!(item_id = %update.item_id, price = %update.new_price, "price update received");
            let _ = event_tx.send(LiveEvent::Price(update));
        }
        Err(_) => {
            // Unknown message shapes are dropped, not surfaced.
            debug!(msg = text, "ignoring unrecognized socket message");
        }
    }
}
