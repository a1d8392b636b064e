//! Order snapshot and totals arithmetic.
//!
//! An order is an immutable snapshot of the cart at submission time plus
//! the customer's delivery and payment details. Totals are computed once,
//! here, and travel with the snapshot; the remote API never recomputes
//! them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gadget_grove_core::{DeliveryZone, Email, Money, OrderId, OrderStatus, PaymentMethod};

use super::item::LineItem;

/// Flat delivery fee inside Dhaka.
pub const SHIPPING_FEE_INSIDE_DHAKA: i64 = 60;

/// Flat delivery fee outside Dhaka.
pub const SHIPPING_FEE_OUTSIDE_DHAKA: i64 = 120;

/// Advance collected up front for cash-on-delivery orders.
pub const COD_ADVANCE: i64 = 100;

/// The only coupon the store honors; zeroes the shipping fee.
pub const FREE_SHIPPING_COUPON: &str = "FREESHIP";

/// Who the order ships to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub zone: DeliveryZone,
}

/// How the order is paid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    /// Wallet transaction id; required for non-COD methods.
    pub transaction_id: Option<String>,
}

/// Computed order totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub shipping_fee: Money,
    /// Advance already paid (COD only, zero otherwise).
    pub advance_paid: Money,
    /// `subtotal + shipping_fee - advance_paid`, floored at zero.
    pub total_due: Money,
}

impl OrderTotals {
    /// Compute totals for a cart subtotal.
    ///
    /// The shipping fee follows the delivery zone; a recognized coupon
    /// zeroes it and unknown coupons have no effect. COD carries a fixed
    /// advance which is deducted from the amount still due.
    #[must_use]
    pub fn compute(
        subtotal: Money,
        zone: DeliveryZone,
        coupon: Option<&str>,
        method: PaymentMethod,
    ) -> Self {
        let shipping_fee = if coupon.is_some_and(is_free_shipping_coupon) {
            Money::bdt(0)
        } else {
            match zone {
                DeliveryZone::InsideDhaka => Money::bdt(SHIPPING_FEE_INSIDE_DHAKA),
                DeliveryZone::OutsideDhaka => Money::bdt(SHIPPING_FEE_OUTSIDE_DHAKA),
            }
        };

        let advance_paid = match method {
            PaymentMethod::CashOnDelivery => Money::bdt(COD_ADVANCE),
            PaymentMethod::Bkash | PaymentMethod::Nagad => Money::bdt(0),
        };

        let total_due = subtotal.plus(&shipping_fee).minus_floor_zero(&advance_paid);

        Self {
            subtotal,
            shipping_fee,
            advance_paid,
            total_due,
        }
    }
}

fn is_free_shipping_coupon(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case(FREE_SHIPPING_COUPON)
}

/// Snapshot submitted to the remote commerce API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: CustomerDetails,
    pub items: Vec<LineItem>,
    pub totals: OrderTotals,
    pub payment: PaymentDetails,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_inside_dhaka_wallet() {
        let totals = OrderTotals::compute(
            Money::bdt(1000),
            DeliveryZone::InsideDhaka,
            None,
            PaymentMethod::Bkash,
        );
        assert_eq!(totals.shipping_fee, Money::bdt(60));
        assert_eq!(totals.advance_paid, Money::bdt(0));
        assert_eq!(totals.total_due, Money::bdt(1060));
    }

    #[test]
    fn test_totals_outside_dhaka_cod() {
        let totals = OrderTotals::compute(
            Money::bdt(1000),
            DeliveryZone::OutsideDhaka,
            None,
            PaymentMethod::CashOnDelivery,
        );
        assert_eq!(totals.shipping_fee, Money::bdt(120));
        assert_eq!(totals.advance_paid, Money::bdt(100));
        assert_eq!(totals.total_due, Money::bdt(1020));
    }

    #[test]
    fn test_totals_identity_holds() {
        // total_due = subtotal + shipping - advance, for all zone/method pairs
        for zone in [DeliveryZone::InsideDhaka, DeliveryZone::OutsideDhaka] {
            for method in [
                PaymentMethod::CashOnDelivery,
                PaymentMethod::Bkash,
                PaymentMethod::Nagad,
            ] {
                let subtotal = Money::bdt(500);
                let t = OrderTotals::compute(subtotal, zone, None, method);
                assert_eq!(
                    t.total_due,
                    t.subtotal.plus(&t.shipping_fee).minus_floor_zero(&t.advance_paid)
                );
            }
        }
    }

    #[test]
    fn test_free_shipping_coupon() {
        let totals = OrderTotals::compute(
            Money::bdt(1000),
            DeliveryZone::OutsideDhaka,
            Some("FREESHIP"),
            PaymentMethod::Nagad,
        );
        assert_eq!(totals.shipping_fee, Money::bdt(0));
        assert_eq!(totals.total_due, Money::bdt(1000));
    }

    #[test]
    fn test_coupon_case_and_whitespace() {
        let totals = OrderTotals::compute(
            Money::bdt(100),
            DeliveryZone::InsideDhaka,
            Some("  freeship "),
            PaymentMethod::Bkash,
        );
        assert_eq!(totals.shipping_fee, Money::bdt(0));
    }

    #[test]
    fn test_unknown_coupon_ignored() {
        let totals = OrderTotals::compute(
            Money::bdt(100),
            DeliveryZone::InsideDhaka,
            Some("WELCOME10"),
            PaymentMethod::Bkash,
        );
        assert_eq!(totals.shipping_fee, Money::bdt(60));
    }

    #[test]
    fn test_total_due_never_negative() {
        // A tiny COD order with free shipping: advance exceeds the total
        let totals = OrderTotals::compute(
            Money::bdt(50),
            DeliveryZone::InsideDhaka,
            Some("FREESHIP"),
            PaymentMethod::CashOnDelivery,
        );
        assert_eq!(totals.total_due, Money::bdt(0));
    }
}
