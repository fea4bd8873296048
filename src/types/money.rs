//! Currency rounding and formatting
//!
//! Amounts are summed at full decimal precision; rounding to cents happens
//! only when a value leaves the pipeline (chart values, JSON, text output).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serializer;

/// Decimal places shown for currency amounts
pub const CURRENCY_DP: u32 = 2;

/// Round to cents, half away from zero (12.345 → 12.35)
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Format as a dollar amount with exactly two decimals (e.g., "$59.75")
pub fn format_currency(amount: Decimal) -> String {
    format!("${:.2}", round_currency(amount))
}

/// Serialize a decimal as a JSON number rounded to cents
pub fn serialize_rounded<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let rounded = round_currency(*amount);
    serializer.serialize_f64(rounded.to_f64().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_currency(dec("12.345")), dec("12.35"));
        assert_eq!(round_currency(dec("12.344")), dec("12.34"));
        assert_eq!(round_currency(dec("0.125")), dec("0.13"));
    }

    #[test]
    fn test_round_keeps_short_values() {
        assert_eq!(round_currency(dec("40")), dec("40"));
        assert_eq!(round_currency(dec("7.2")), dec("7.2"));
    }

    #[test]
    fn test_format_pads_to_two_decimals() {
        assert_eq!(format_currency(dec("40")), "$40.00");
        assert_eq!(format_currency(dec("59.75")), "$59.75");
        assert_eq!(format_currency(dec("0.005")), "$0.01");
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_serialize_rounded_is_number() {
        #[derive(serde::Serialize)]
        struct Wrapper {
            #[serde(serialize_with = "serialize_rounded")]
            value: Decimal,
        }

        let json = serde_json::to_string(&Wrapper {
            value: dec("19.754"),
        })
        .unwrap();
        assert_eq!(json, r#"{"value":19.75}"#);
    }
}
