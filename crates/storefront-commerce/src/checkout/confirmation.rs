//! Snapshot of a placed order.

use crate::cart::{LineItem, PricingBreakdown};
use crate::checkout::ShippingForm;
use crate::ids::OrderId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What the shopper sees after placing an order.
///
/// Taken from the cart immediately before it is cleared, so it stays valid
/// after the cart has moved on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConfirmation {
    /// Generated order id.
    pub order_id: OrderId,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    /// Ordered lines.
    pub items: Vec<LineItem>,
    /// Prices at the time of ordering.
    pub breakdown: PricingBreakdown,
    /// Shipping details.
    pub ship_to: ShippingForm,
    /// Where the confirmation email goes.
    pub contact_email: String,
}

impl OrderConfirmation {
    pub(crate) fn new(
        items: Vec<LineItem>,
        breakdown: PricingBreakdown,
        ship_to: ShippingForm,
    ) -> Self {
        let contact_email = ship_to.email.trim().to_string();
        Self {
            order_id: OrderId::generate(),
            placed_at: Utc::now(),
            items,
            breakdown,
            ship_to,
            contact_email,
        }
    }

    /// Total number of units ordered.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// One-line summary, e.g. "Order 1f0c... - 3 items - $58.20".
    pub fn summary_line(&self) -> String {
        let count = self.item_count();
        let noun = if count == 1 { "item" } else { "items" };
        format!(
            "Order {} - {} {} - {}",
            self.order_id,
            count,
            noun,
            self.breakdown.total.display()
        )
    }
}
