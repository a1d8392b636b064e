//! Order notification webhook.
//!
//! After an order is accepted the shop operator gets a webhook POST with
//! the order summary. Delivery is best-effort: failures are logged and
//! never surfaced to the customer.

use serde::Serialize;

use crate::models::Order;

/// Sends order confirmations to a configured webhook endpoint.
#[derive(Clone)]
pub struct OrderNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

#[derive(Serialize)]
struct OrderNotification<'a> {
    event: &'static str,
    order_id: &'a str,
    customer_name: &'a str,
    customer_email: &'a str,
    item_count: u32,
    total_due: &'a gadget_grove_core::Money,
    placed_at: chrono::DateTime<chrono::Utc>,
}

impl OrderNotifier {
    /// Create a notifier. A `None` webhook URL disables notifications.
    #[must_use]
    pub fn new(client: reqwest::Client, webhook_url: Option<String>) -> Self {
        Self {
            client,
            webhook_url,
        }
    }

    /// Whether a webhook endpoint is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Send an order-placed notification. Errors are logged, not returned.
    pub async fn order_placed(&self, order: &Order) {
        let Some(url) = &self.webhook_url else {
            return;
        };

        let payload = OrderNotification {
            event: "order.placed",
            order_id: order.id.as_str(),
            customer_name: &order.customer.name,
            customer_email: order.customer.email.as_str(),
            item_count: order.items.iter().map(|i| i.quantity).sum(),
            total_due: &order.totals.total_due,
            placed_at: order.placed_at,
        };

        match self.client.post(url).json(&payload).send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::debug!(order_id = %order.id, "order notification delivered");
            }
            Ok(resp) => {
                tracing::warn!(
                    order_id = %order.id,
                    status = %resp.status(),
                    "order notification rejected by webhook"
                );
            }
            Err(e) => {
                tracing::warn!(order_id = %order.id, error = %e, "order notification failed");
            }
        }
    }
}
