//! Page controller: glue between the API client, the renderer, and the
//! live price feed.
//!
//! Control flow mirrors the page lifecycle: a load does the parallel fetch
//! and a full render, a submit POSTs and then refetches the offer list
//! once, and live updates patch the price line independently of both.

use rust_decimal::Decimal;
use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::model::{Item, OfferForm, PriceUpdate};
use crate::view;

/// Outcome of an accepted submission: the status message plus the
/// re-fetched, re-rendered offer list, the only section replaced.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub message: &'static str,
    pub offers_view: String,
}

pub struct ItemPage {
    api: ApiClient,
    item_id: String,
    item: Option<Item>,
}

impl ItemPage {
    pub fn new(api: ApiClient, item_id: impl Into<String>) -> Self {
        Self {
            api,
            item_id: item_id.into(),
            item: None,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// The price currently on display, if the page has loaded.
    pub fn current_price(&self) -> Option<Decimal> {
        self.item.as_ref().map(|item| item.price)
    }

    /// Load the item and its offers in parallel and render the full page.
    /// Either fetch failing aborts the load; nothing is partially rendered.
    pub async fn load(&mut self) -> Result<String, ApiError> {
        let (item, offers) = self.api.fetch_item_page(&self.item_id).await?;
        let page = view::render_page(&item, &offers);
        self.item = Some(item);
        Ok(page)
    }

    /// Re-fetch and re-render the offer list alone.
    pub async fn refresh_offers(&self) -> Result<String, ApiError> {
        let offers = self.api.fetch_offers(&self.item_id).await?;
        Ok(view::render_offer_list(&offers))
    }

    /// Submit an offer. On acceptance the offer list is fetched exactly
    /// once more so the caller can replace that section; rejections and
    /// transport failures propagate without any further request.
    pub async fn submit(&mut self, form: &OfferForm) -> Result<SubmitOutcome, ApiError> {
        self.api.submit_offer(&self.item_id, form).await?;
        let offers_view = self.refresh_offers().await?;
        Ok(SubmitOutcome {
            message: "Offer submitted successfully!",
            offers_view,
        })
    }

    /// Apply a pushed price update. Updates for other items, or arriving
    /// before the first successful load, are ignored.
    pub fn apply_price_update(&mut self, update: &PriceUpdate) -> Option<String> {
        if !update.applies_to(&self.item_id) {
            return None;
        }
        let Some(item) = self.item.as_mut() else {
            debug!(item_id = %update.item_id, "price update before first load, dropping");
            return None;
        };
        item.price = update.new_price;
        Some(view::render_price_line(item))
    }
}
