//! Wire and domain types shared by the page client and the auction server.
//!
//! Field names follow the JSON the backend speaks: camelCase on the wire,
//! snake_case in Rust.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money;

/// A listed item, as served by `GET /api/items/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    #[serde(with = "money::serde_float")]
    pub price: Decimal,
}

/// Catalog listing row for `GET /api/items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: String,
    pub name: String,
    #[serde(with = "money::serde_float")]
    pub price: Decimal,
}

/// A single bid against an item. Immutable once received; offer lists are
/// re-fetched wholesale rather than patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub item_id: String,
    pub name: String,
    pub email: String,
    #[serde(with = "money::serde_float")]
    pub amount: Decimal,
}

/// The offer submission form, serialized form-encoded. The amount stays a
/// string until the server validates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferForm {
    #[serde(rename = "offerAmount")]
    pub offer_amount: String,
    #[serde(rename = "bidderName")]
    pub bidder_name: String,
    #[serde(rename = "bidderEmail")]
    pub bidder_email: String,
}

/// Success payload for an accepted offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAck {
    pub success: bool,
    #[serde(with = "money::serde_float")]
    pub new_price: Decimal,
}

/// Structured error payload: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Messages pushed on the price-update socket, discriminated by the `type`
/// field. Unrecognized types fail to parse and are dropped by the listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LiveMessage {
    #[serde(rename = "PRICE_UPDATE")]
    PriceUpdate(PriceUpdate),
}

/// A pushed price change for a single item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdate {
    pub item_id: String,
    /// Arrives as a formatted string on the socket, as a number elsewhere.
    pub new_price: Decimal,
}

impl PriceUpdate {
    /// Whether this update targets the given item.
    pub fn applies_to(&self, item_id: &str) -> bool {
        self.item_id == item_id
    }
}

/// Cross-item leaderboard row: a top bid joined with its item's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedOffer {
    pub item_name: String,
    pub name: String,
    pub email: String,
    #[serde(with = "money::serde_float")]
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_price_update_parses_string_price() {
        let msg: LiveMessage = serde_json::from_str(
            r#"{"type":"PRICE_UPDATE","itemId":"watch-001","newPrice":"155.00"}"#,
        )
        .unwrap();
        let LiveMessage::PriceUpdate(update) = msg;
        assert_eq!(update.item_id, "watch-001");
        assert_eq!(update.new_price, Decimal::from_str("155").unwrap());
    }

    #[test]
    fn test_price_update_parses_numeric_price() {
        let msg: LiveMessage = serde_json::from_str(
            r#"{"type":"PRICE_UPDATE","itemId":"watch-001","newPrice":155.5}"#,
        )
        .unwrap();
        let LiveMessage::PriceUpdate(update) = msg;
        assert_eq!(update.new_price, Decimal::from_str("155.5").unwrap());
    }

    #[test]
    fn test_unknown_message_type_is_rejected() {
        let parsed = serde_json::from_str::<LiveMessage>(r#"{"type":"HEARTBEAT"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_applies_to_filters_by_item_id() {
        let update = PriceUpdate {
            item_id: "watch-001".to_string(),
            new_price: Decimal::from_str("10").unwrap(),
        };
        assert!(update.applies_to("watch-001"));
        assert!(!update.applies_to("comic-002"));
    }

    #[test]
    fn test_item_price_serializes_as_number() {
        let item = Item {
            id: "watch-001".to_string(),
            name: "Vintage Omega Seamaster".to_string(),
            description: "1960s dress watch.".to_string(),
            image_url: "/images/watch-001.jpg".to_string(),
            price: Decimal::from_str("1250.5").unwrap(),
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""price":1250.5"#));
        assert!(json.contains(r#""imageUrl":"/images/watch-001.jpg""#));

        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back.price, item.price);
    }
}
