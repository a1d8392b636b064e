//! Checkout: turn the current cart into a submitted order.
//!
//! The flow is validate, snapshot the cart, compute totals, submit to the
//! commerce API, then clear the cart. The cart is only cleared after the
//! API has accepted the order, so a failed submission leaves the cart
//! intact for a retry.

use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use gadget_grove_core::{
    DeliveryZone, Email, EmailError, OrderId, OrderStatus, PaymentMethod,
};

use crate::catalog::{CatalogClient, CatalogError, CreatedOrder};
use crate::db::RepositoryError;
use crate::db::item_lists::ItemListRepository;
use crate::models::{CustomerDetails, ListKind, ListScope, Order, OrderTotals, PaymentDetails};
use crate::services::OrderNotifier;

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required field is missing or malformed.
    #[error("invalid order details: {0}")]
    Validation(String),

    /// The email address is malformed.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// There is nothing in the cart to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The commerce API rejected or failed the submission.
    #[error("order submission failed: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart storage failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Customer-supplied checkout form.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub zone: DeliveryZone,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub coupon: Option<String>,
}

impl CheckoutRequest {
    /// Validate the form and produce the customer and payment details.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Validation` for missing fields and
    /// `CheckoutError::InvalidEmail` for a malformed email.
    pub fn validate(&self) -> Result<(CustomerDetails, PaymentDetails), CheckoutError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CheckoutError::Validation("name is required".into()));
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err(CheckoutError::Validation("phone is required".into()));
        }

        let address = self.address.trim();
        if address.is_empty() {
            return Err(CheckoutError::Validation(
                "delivery address is required".into(),
            ));
        }

        let email = Email::parse(&self.email)?;

        let transaction_id = self
            .transaction_id
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from);

        if self.payment_method.requires_transaction_id() && transaction_id.is_none() {
            return Err(CheckoutError::Validation(format!(
                "a transaction id is required for {} payments",
                self.payment_method
            )));
        }

        let customer = CustomerDetails {
            name: name.to_owned(),
            email,
            phone: phone.to_owned(),
            address: address.to_owned(),
            zone: self.zone,
        };
        let payment = PaymentDetails {
            method: self.payment_method,
            transaction_id,
        };

        Ok((customer, payment))
    }
}

/// Places orders against the commerce API.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
    catalog: &'a CatalogClient,
    notifier: OrderNotifier,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, catalog: &'a CatalogClient, notifier: OrderNotifier) -> Self {
        Self {
            pool,
            catalog,
            notifier,
        }
    }

    /// Place an order from the cart held under `scope`.
    ///
    /// On success the cart is cleared and the created order id returned.
    /// If clearing fails after the API accepted the order, the failure is
    /// logged and the order still counts as placed.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if there is nothing to order,
    /// validation errors for a bad form, and `CheckoutError::Catalog` if
    /// the commerce API refuses the submission.
    pub async fn place_order(
        &self,
        scope: &ListScope,
        request: &CheckoutRequest,
    ) -> Result<CreatedOrder, CheckoutError> {
        let (customer, payment) = request.validate()?;

        let lists = ItemListRepository::new(self.pool);
        let cart_key = scope.storage_key(ListKind::Cart);
        let cart = lists.load(&cart_key).await?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let totals = OrderTotals::compute(
            cart.subtotal(),
            customer.zone,
            request.coupon.as_deref(),
            payment.method,
        );

        let order = Order {
            id: OrderId::new(Uuid::new_v4().to_string()),
            customer,
            items: cart.into_items(),
            totals,
            payment,
            status: OrderStatus::Pending,
            placed_at: Utc::now(),
        };

        let created = self.catalog.submit_order(&order).await?;
        tracing::info!(order_id = %created.id, "order submitted");

        if self.notifier.is_enabled() {
            let notifier = self.notifier.clone();
            let order = order.clone();
            tokio::spawn(async move {
                notifier.order_placed(&order).await;
            });
        }

        if let Err(e) = lists.clear(&cart_key).await {
            tracing::error!(key = %cart_key, error = %e, "failed to clear cart after checkout");
        }

        Ok(created)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            name: "Alice Rahman".into(),
            email: "alice@example.com".into(),
            phone: "01700000000".into(),
            address: "12 Green Road, Dhaka".into(),
            zone: DeliveryZone::InsideDhaka,
            payment_method: PaymentMethod::CashOnDelivery,
            transaction_id: None,
            coupon: None,
        }
    }

    #[test]
    fn test_validate_ok() {
        let (customer, payment) = request().validate().unwrap();
        assert_eq!(customer.name, "Alice Rahman");
        assert_eq!(customer.email.as_str(), "alice@example.com");
        assert_eq!(payment.method, PaymentMethod::CashOnDelivery);
        assert!(payment.transaction_id.is_none());
    }

    #[test]
    fn test_validate_trims_fields() {
        let mut req = request();
        req.name = "  Alice  ".into();
        req.address = " 12 Green Road ".into();
        let (customer, _) = req.validate().unwrap();
        assert_eq!(customer.name, "Alice");
        assert_eq!(customer.address, "12 Green Road");
    }

    #[test]
    fn test_validate_missing_name() {
        let mut req = request();
        req.name = "   ".into();
        assert!(matches!(
            req.validate(),
            Err(CheckoutError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_missing_phone() {
        let mut req = request();
        req.phone = String::new();
        assert!(matches!(
            req.validate(),
            Err(CheckoutError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_bad_email() {
        let mut req = request();
        req.email = "not-an-email".into();
        assert!(matches!(req.validate(), Err(CheckoutError::InvalidEmail(_))));
    }

    #[test]
    fn test_wallet_payment_requires_transaction_id() {
        let mut req = request();
        req.payment_method = PaymentMethod::Bkash;
        assert!(matches!(
            req.validate(),
            Err(CheckoutError::Validation(_))
        ));

        req.transaction_id = Some("TX12345".into());
        let (_, payment) = req.validate().unwrap();
        assert_eq!(payment.transaction_id.as_deref(), Some("TX12345"));
    }

    #[test]
    fn test_blank_transaction_id_is_missing() {
        let mut req = request();
        req.payment_method = PaymentMethod::Nagad;
        req.transaction_id = Some("   ".into());
        assert!(matches!(
            req.validate(),
            Err(CheckoutError::Validation(_))
        ));
    }
}
