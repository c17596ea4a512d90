//! Currency formatting and wire-format helpers for prices.
//!
//! Every price and offer amount in the crate is a `Decimal`; conversion to
//! and from JSON floats happens only at the wire boundary via
//! [`serde_float`].

use rust_decimal::Decimal;

/// Format an amount as a US-dollar string with two fixed decimals and
/// thousands separators, e.g. `$1,234.56`.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut out = String::new();
    if rounded.is_sign_negative() {
        out.push('-');
    }
    out.push('$');
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push('.');
    out.push_str(frac_part);
    out
}

/// Serde helpers for `Decimal` fields that cross the wire as JSON numbers.
///
/// Serialization emits a plain f64. Deserialization stays lenient and
/// accepts either a number or a numeric string; the live feed formats
/// prices as strings while the REST payloads use numbers.
pub mod serde_float {
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(value.to_f64().unwrap_or_default())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        <Decimal as Deserialize>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_usd_groups_thousands() {
        assert_eq!(format_usd(dec("1234.56")), "$1,234.56");
        assert_eq!(format_usd(dec("1000000.5")), "$1,000,000.50");
        assert_eq!(format_usd(dec("999")), "$999.00");
    }

    #[test]
    fn test_format_usd_pads_and_rounds() {
        assert_eq!(format_usd(Decimal::ZERO), "$0.00");
        assert_eq!(format_usd(dec("0.5")), "$0.50");
        assert_eq!(format_usd(dec("99.999")), "$100.00");
    }

    #[test]
    fn test_format_usd_negative() {
        assert_eq!(format_usd(dec("-12.5")), "-$12.50");
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Priced {
        #[serde(with = "serde_float")]
        price: Decimal,
    }

    #[test]
    fn test_serde_float_serializes_as_number() {
        let json = serde_json::to_string(&Priced { price: dec("120.5") }).unwrap();
        assert_eq!(json, r#"{"price":120.5}"#);
    }

    #[test]
    fn test_serde_float_accepts_number_or_string() {
        let from_number: Priced = serde_json::from_str(r#"{"price":120.5}"#).unwrap();
        assert_eq!(from_number.price, dec("120.5"));

        let from_string: Priced = serde_json::from_str(r#"{"price":"120.50"}"#).unwrap();
        assert_eq!(from_string.price, dec("120.5"));
    }
}
