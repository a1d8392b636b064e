//! Monetary amounts using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount with its currency.
///
/// Amounts are `rust_decimal` values serialized as strings to preserve
/// precision on the wire. Arithmetic helpers assume both operands share a
/// currency; mixing currencies is a programming error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., taka, not poisha).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency: Currency,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// A Bangladeshi taka amount from whole units.
    #[must_use]
    pub fn bdt(units: i64) -> Self {
        Self::new(Decimal::from(units), Currency::BDT)
    }

    /// Zero in the given currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// `true` if the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Sum of two amounts.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        debug_assert_eq!(self.currency, other.currency);
        Self::new(self.amount + other.amount, self.currency)
    }

    /// Difference, floored at zero. Used when deducting an advance already
    /// paid from the amount still due.
    #[must_use]
    pub fn minus_floor_zero(&self, other: &Self) -> Self {
        debug_assert_eq!(self.currency, other.currency);
        let diff = self.amount - other.amount;
        Self::new(diff.max(Decimal::ZERO), self.currency)
    }

    /// This amount scaled by a line quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency.code())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    BDT,
    USD,
}

impl Currency {
    /// The three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BDT => "BDT",
            Self::USD => "USD",
        }
    }

    /// The display symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::BDT => "৳",
            Self::USD => "$",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn taka(s: &str) -> Money {
        Money::new(s.parse().unwrap(), Currency::BDT)
    }

    #[test]
    fn test_plus() {
        let a = Money::bdt(60);
        let b = Money::bdt(40);
        assert_eq!(a.plus(&b), Money::bdt(100));
    }

    #[test]
    fn test_minus_floor_zero_floors() {
        let subtotal = Money::bdt(50);
        let advance = Money::bdt(100);
        assert_eq!(subtotal.minus_floor_zero(&advance), Money::bdt(0));
    }

    #[test]
    fn test_minus_floor_zero_normal() {
        let total = Money::bdt(260);
        let advance = Money::bdt(100);
        assert_eq!(total.minus_floor_zero(&advance), Money::bdt(160));
    }

    #[test]
    fn test_times() {
        let price = taka("149.50");
        assert_eq!(price.times(3), taka("448.50"));
    }

    #[test]
    fn test_serde_amount_as_string() {
        // rust_decimal's serde-with-str feature keeps precision on the wire
        let m = taka("1299.00");
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"1299.00\""));

        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_currency_defaults_to_bdt() {
        let m: Money = serde_json::from_str(r#"{"amount":"10"}"#).unwrap();
        assert_eq!(m.currency, Currency::BDT);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::bdt(120).to_string(), "120 BDT");
    }
}
