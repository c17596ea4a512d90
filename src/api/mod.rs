//! HTTP client for the auction API.
//!
//! One client per page view. The loader issues the item and offer fetches
//! concurrently and treats either failure as fatal for the load; the
//! submitter POSTs the offer form and surfaces the server's structured
//! rejection message. No retries, no timeouts.

use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::model::{ApiErrorBody, Item, Offer, OfferForm, SubmitAck};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not fetch {resource} (status {status})")]
    Status {
        resource: &'static str,
        status: StatusCode,
    },
    /// A non-success response from the offer endpoint, carrying the
    /// server's error message when one was present.
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn fetch_item(&self, item_id: &str) -> Result<Item, ApiError> {
        let url = format!("{}/api/items/{}", self.base_url, item_id);
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                resource: "item",
                status: resp.status(),
            });
        }
        Ok(resp.json().await?)
    }

    pub async fn fetch_offers(&self, item_id: &str) -> Result<Vec<Offer>, ApiError> {
        let url = format!("{}/api/offers/{}", self.base_url, item_id);
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                resource: "offers",
                status: resp.status(),
            });
        }
        Ok(resp.json().await?)
    }

    /// Fetch the item and its offers in parallel, waiting for both.
    /// Either failure aborts the pair; no further request is made.
    pub async fn fetch_item_page(&self, item_id: &str) -> Result<(Item, Vec<Offer>), ApiError> {
        let (item, offers) = tokio::join!(self.fetch_item(item_id), self.fetch_offers(item_id));
        Ok((item?, offers?))
    }

    /// POST the offer form. Business-rule rejections come back as
    /// [`ApiError::Rejected`] with the server's message.
    pub async fn submit_offer(
        &self,
        item_id: &str,
        form: &OfferForm,
    ) -> Result<SubmitAck, ApiError> {
        let url = format!("{}/{}/offer", self.base_url, item_id);
        let resp = self.http.post(&url).form(form).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = match resp.json::<ApiErrorBody>().await {
                Ok(body) => body.error,
                Err(e) => {
                    debug!(error = %e, status = %status, "rejection without structured body");
                    "offer submission failed".to_string()
                }
            };
            return Err(ApiError::Rejected(message));
        }

        Ok(resp.json().await?)
    }
}
