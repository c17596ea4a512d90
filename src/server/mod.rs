//! Axum-based auction backend for the item detail page.
//!
//! Provides:
//!   GET  /api/items          → catalog summaries
//!   GET  /api/items/:id      → full item JSON
//!   GET  /api/offers/:id     → offers for an item (possibly empty)
//!   GET  /api/ranking        → top bids across all items
//!   POST /:id/offer          → form-encoded offer submission
//!   GET  /ws/price-updates   → price-update push socket

pub mod store;

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Form, Path as UrlPath, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use futures_util::{SinkExt, StreamExt};
use rust_decimal::Decimal;
use serde_json::json;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::model::{LiveMessage, Offer, OfferForm, PriceUpdate, SubmitAck};
use crate::server::store::{Catalog, OfferBook, StoreError};

/// Broadcast capacity for price updates; a lagging socket drops backlog
/// rather than slowing the form handler.
const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<Catalog>>,
    pub offers: Arc<RwLock<OfferBook>>,
    pub updates: broadcast::Sender<PriceUpdate>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            offers: Arc::new(RwLock::new(OfferBook::new())),
            updates,
        }
    }

    pub fn from_items_file(path: &Path) -> Result<Self, StoreError> {
        Ok(Self::new(Catalog::load(path)?))
    }
}

/// Build the router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/items", get(api_items))
        .route("/api/items/:id", get(api_item))
        .route("/api/offers/:id", get(api_offers))
        .route("/api/ranking", get(api_ranking))
        .route("/:id/offer", post(post_offer))
        .route("/ws/price-updates", get(ws_price_updates))
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn serve(state: AppState, bind_addr: &str) -> anyhow::Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = bind_addr, "auction server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

// --- API handlers ---

async fn api_items(State(state): State<AppState>) -> Response {
    let catalog = state.catalog.read().await;
    Json(catalog.summaries()).into_response()
}

async fn api_item(State(state): State<AppState>, UrlPath(id): UrlPath<String>) -> Response {
    let catalog = state.catalog.read().await;
    match catalog.get(&id) {
        Some(item) => Json(item.clone()).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "item not found"),
    }
}

async fn api_offers(State(state): State<AppState>, UrlPath(id): UrlPath<String>) -> Response {
    let offers = state.offers.read().await;
    Json(offers.offers_for(&id)).into_response()
}

async fn api_ranking(State(state): State<AppState>) -> Response {
    let catalog = state.catalog.read().await;
    let offers = state.offers.read().await;
    Json(offers.top_ranked(&catalog, 10)).into_response()
}

async fn post_offer(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
    Form(form): Form<OfferForm>,
) -> Response {
    if !state.catalog.read().await.contains(&id) {
        return error_response(StatusCode::NOT_FOUND, "item not found");
    }

    let amount = match Decimal::from_str(form.offer_amount.trim()) {
        Ok(a) => a,
        Err(_) => return error_response(StatusCode::BAD_REQUEST, "invalid offer amount"),
    };

    let offer = Offer {
        item_id: id.clone(),
        name: form.bidder_name,
        email: form.bidder_email,
        amount,
    };

    if let Err(rejection) = state.offers.write().await.add(offer) {
        return error_response(StatusCode::BAD_REQUEST, &rejection.message);
    }

    info!(item_id = %id, amount = %amount, "offer accepted");

    // An accepted bid becomes the item's current value.
    if state.catalog.write().await.update_price(&id, amount) {
        let update = PriceUpdate {
            item_id: id,
            new_price: amount.round_dp(2),
        };
        let receivers = state.updates.send(update).unwrap_or(0);
        debug!(receivers, "price update broadcast");
    }

    (
        StatusCode::CREATED,
        Json(SubmitAck {
            success: true,
            new_price: amount,
        }),
    )
        .into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

// --- Price-update socket ---

async fn ws_price_updates(
    State(state): State<AppState>,
    upgrade: WebSocketUpgrade,
) -> Response {
    let updates = state.updates.subscribe();
    upgrade.on_upgrade(move |socket| stream_price_updates(socket, updates))
}

async fn stream_price_updates(
    socket: WebSocket,
    mut updates: broadcast::Receiver<PriceUpdate>,
) {
    let (mut write, mut read) = socket.split();

    info!("price-update subscriber connected");

    loop {
        tokio::select! {
            update = updates.recv() => {
                let update = match update {
                    Ok(u) => u,
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(missed, "price-update subscriber lagged");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                let frame = match serde_json::to_string(&LiveMessage::PriceUpdate(update)) {
                    Ok(f) => f,
                    Err(e) => {
                        warn!(error = %e, "failed to encode price update");
                        continue;
                    }
                };
                if write.send(Message::Text(frame)).await.is_err() {
                    break;
                }
            }

            incoming = read.next() => {
                match incoming {
                    // Subscribers are not expected to send anything.
                    Some(Ok(Message::Text(text))) => {
                        debug!(msg = %text, "ignoring subscriber message");
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!(error = %e, "price-update subscriber read error");
                        break;
                    }
                }
            }
        }
    }

    info!("price-update subscriber disconnected");
}
