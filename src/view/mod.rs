//! Renders the item detail page.
//!
//! Pure functions from (item, offers) to displayed text. Every call
//! rebuilds its section from scratch and the caller replaces the previous
//! output wholesale; there is no diffing.

use crate::model::{Item, Offer};
use crate::money::format_usd;

/// Empty-state line shown when an item has no bids yet.
pub const NO_OFFERS: &str = "No bids yet. Be the first to make an offer!";

/// The full page: header, details, the offer prompt, and the bid list.
pub fn render_page(item: &Item, offers: &[Offer]) -> String {
    let mut page = String::new();
    page.push_str(&format!("==== {} ====\n\n", item.name));
    page.push_str(&format!("{}\n", item.description));
    page.push_str(&format!("image: {}\n\n", item.image_url));
    page.push_str(&render_price_line(item));
    page.push('\n');
    page.push('\n');
    page.push_str(&render_offer_prompt());
    page.push_str("\nCurrent Bids\n");
    page.push_str(&render_offer_list(offers));
    page
}

/// The single price node that live updates patch in place.
pub fn render_price_line(item: &Item) -> String {
    format!("Current Value: {}", format_usd(item.price))
}

/// The make-an-offer section. The prompt stands in for the form; the
/// command arguments are its fields.
pub fn render_offer_prompt() -> String {
    "Make an Offer\n  offer <amount> <name> <email>\n".to_string()
}

/// One card per offer, highest first as served. Empty list renders the
/// empty-state message.
pub fn render_offer_list(offers: &[Offer]) -> String {
    if offers.is_empty() {
        return format!("  {}\n", NO_OFFERS);
    }

    let mut out = String::new();
    for offer in offers {
        out.push_str(&format!(
            "  {}  from {} ({})\n",
            format_usd(offer.amount),
            offer.name,
            offer.email
        ));
    }
    out
}

/// Error page replacing all content when a load fails.
pub fn render_error_banner(message: &str) -> String {
    format!("Error: {message}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn sample_item() -> Item {
        Item {
            id: "watch-001".to_string(),
            name: "Vintage Omega Seamaster".to_string(),
            description: "1960s dress watch, recently serviced.".to_string(),
            image_url: "/images/watch-001.jpg".to_string(),
            price: Decimal::from_str("1250").unwrap(),
        }
    }

    fn offer(amount: &str, name: &str, email: &str) -> Offer {
        Offer {
            item_id: "watch-001".to_string(),
            name: name.to_string(),
            email: email.to_string(),
            amount: Decimal::from_str(amount).unwrap(),
        }
    }

    #[test]
    fn test_empty_offer_list_renders_empty_state() {
        assert!(render_offer_list(&[]).contains(NO_OFFERS));
    }

    #[test]
    fn test_offer_list_renders_amount_name_email() {
        let offers = vec![
            offer("1500", "jane", "jane@example.com"),
            offer("1234.5", "bob", "bob@example.com"),
        ];
        let out = render_offer_list(&offers);
        assert!(out.contains("$1,500.00"));
        assert!(out.contains("jane"));
        assert!(out.contains("jane@example.com"));
        assert!(out.contains("$1,234.50"));
        assert!(out.contains("bob"));
        assert!(out.contains("bob@example.com"));
    }

    #[test]
    fn test_page_contains_header_details_and_price() {
        let page = render_page(&sample_item(), &[]);
        assert!(page.contains("==== Vintage Omega Seamaster ===="));
        assert!(page.contains("1960s dress watch"));
        assert!(page.contains("image: /images/watch-001.jpg"));
        assert!(page.contains("Current Value: $1,250.00"));
        assert!(page.contains("Make an Offer"));
        assert!(page.contains(NO_OFFERS));
    }

    #[test]
    fn test_error_banner() {
        assert_eq!(
            render_error_banner("could not fetch item (status 404 Not Found)"),
            "Error: could not fetch item (status 404 Not Found)\n"
        );
    }
}
