//! In-memory catalog and offer book.
//!
//! Items load once from a JSON file at startup; offers live for the
//! process lifetime. The one business rule: a new offer must beat the
//! current highest bid on its item.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use crate::model::{Item, ItemSummary, Offer, RankedOffer};
use crate::money::format_usd;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read item catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse item catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Rejection from the offer book's business rule.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("{message}")]
pub struct OfferRejected {
    pub message: String,
}

/// Item catalog, keyed by id.
#[derive(Debug, Default)]
pub struct Catalog {
    items: HashMap<String, Item>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        let items: Vec<Item> = serde_json::from_str(&contents)?;
        info!(items = items.len(), path = %path.display(), "item catalog loaded");
        Ok(Self::from_items(items))
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        let items = items.into_iter().map(|item| (item.id.clone(), item)).collect();
        Self { items }
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.items.get(id).map(|item| item.name.as_str())
    }

    /// Listing rows for the catalog endpoint, ordered by id for stable
    /// output.
    pub fn summaries(&self) -> Vec<ItemSummary> {
        let mut rows: Vec<ItemSummary> = self
            .items
            .values()
            .map(|item| ItemSummary {
                id: item.id.clone(),
                name: item.name.clone(),
                price: item.price,
            })
            .collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        rows
    }

    /// Set an item's price to an accepted offer amount.
    /// Returns false when the item is unknown.
    pub fn update_price(&mut self, id: &str, price: Decimal) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.price = price;
                true
            }
            None => false,
        }
    }
}

/// All offers received this process, in arrival order.
#[derive(Debug, Default)]
pub struct OfferBook {
    offers: Vec<Offer>,
}

impl OfferBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers for one item, highest amount first.
    pub fn offers_for(&self, item_id: &str) -> Vec<Offer> {
        let mut offers: Vec<Offer> = self
            .offers
            .iter()
            .filter(|offer| offer.item_id == item_id)
            .cloned()
            .collect();
        offers.sort_by(|a, b| b.amount.cmp(&a.amount));
        offers
    }

    fn max_amount_for(&self, item_id: &str) -> Option<Decimal> {
        self.offers
            .iter()
            .filter(|offer| offer.item_id == item_id)
            .map(|offer| offer.amount)
            .max()
    }

    /// Record an offer if it beats the current highest bid on its item.
    pub fn add(&mut self, offer: Offer) -> Result<(), OfferRejected> {
        if let Some(max) = self.max_amount_for(&offer.item_id) {
            if offer.amount <= max {
                return Err(OfferRejected {
                    message: format!(
                        "offer must be higher than the current max bid of {}",
                        format_usd(max)
                    ),
                });
            }
        }
        self.offers.push(offer);
        Ok(())
    }

    /// Top bids across every item, highest first, joined with item names.
    /// Offers whose item is not in the catalog are skipped.
    pub fn top_ranked(&self, catalog: &Catalog, limit: usize) -> Vec<RankedOffer> {
        let mut offers: Vec<&Offer> = self.offers.iter().collect();
        offers.sort_by(|a, b| b.amount.cmp(&a.amount));
        offers
            .into_iter()
            .filter_map(|offer| {
                catalog.name_of(&offer.item_id).map(|item_name| RankedOffer {
                    item_name: item_name.to_string(),
                    name: offer.name.clone(),
                    email: offer.email.clone(),
                    amount: offer.amount,
                })
            })
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn item(id: &str, name: &str, price: &str) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            image_url: String::new(),
            price: Decimal::from_str(price).unwrap(),
        }
    }

    fn offer(item_id: &str, amount: &str, name: &str) -> Offer {
        Offer {
            item_id: item_id.to_string(),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            amount: Decimal::from_str(amount).unwrap(),
        }
    }

    #[test]
    fn test_first_offer_accepted() {
        let mut book = OfferBook::new();
        assert!(book.add(offer("watch-001", "100", "jane")).is_ok());
    }

    #[test]
    fn test_lower_or_equal_offer_rejected() {
        let mut book = OfferBook::new();
        book.add(offer("watch-001", "1500", "jane")).unwrap();

        let equal = book.add(offer("watch-001", "1500", "bob")).unwrap_err();
        assert_eq!(
            equal.message,
            "offer must be higher than the current max bid of $1,500.00"
        );
        assert!(book.add(offer("watch-001", "1200", "bob")).is_err());
    }

    #[test]
    fn test_rule_is_scoped_per_item() {
        let mut book = OfferBook::new();
        book.add(offer("watch-001", "1500", "jane")).unwrap();
        // A lower bid on a different item is fine.
        assert!(book.add(offer("comic-002", "100", "bob")).is_ok());
    }

    #[test]
    fn test_offers_for_sorted_highest_first() {
        let mut book = OfferBook::new();
        book.add(offer("watch-001", "100", "jane")).unwrap();
        book.add(offer("watch-001", "300", "bob")).unwrap();
        book.add(offer("comic-002", "200", "amy")).unwrap();

        let offers = book.offers_for("watch-001");
        let amounts: Vec<String> = offers.iter().map(|o| o.amount.to_string()).collect();
        assert_eq!(amounts, vec!["300", "100"]);
    }

    #[test]
    fn test_top_ranked_joins_names_and_limits() {
        let catalog = Catalog::from_items(vec![
            item("watch-001", "Vintage Omega Seamaster", "100"),
            item("comic-002", "Amazing Fantasy #15", "100"),
        ]);
        let mut book = OfferBook::new();
        book.add(offer("watch-001", "100", "jane")).unwrap();
        book.add(offer("comic-002", "500", "bob")).unwrap();
        book.add(offer("watch-001", "300", "amy")).unwrap();

        let ranked = book.top_ranked(&catalog, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].item_name, "Amazing Fantasy #15");
        assert_eq!(ranked[0].name, "bob");
        assert_eq!(ranked[1].item_name, "Vintage Omega Seamaster");
        assert_eq!(ranked[1].name, "amy");
    }

    #[test]
    fn test_catalog_update_price() {
        let mut catalog = Catalog::from_items(vec![item("watch-001", "Watch", "100")]);
        assert!(catalog.update_price("watch-001", Decimal::from_str("250").unwrap()));
        assert_eq!(
            catalog.get("watch-001").unwrap().price,
            Decimal::from_str("250").unwrap()
        );
        assert!(!catalog.update_price("nope", Decimal::ONE));
    }

    #[test]
    fn test_catalog_summaries_sorted_by_id() {
        let catalog = Catalog::from_items(vec![
            item("b", "B", "1"),
            item("a", "A", "2"),
        ]);
        let summaries = catalog.summaries();
        let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
