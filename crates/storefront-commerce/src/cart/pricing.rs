//! Cart pricing calculations.
//!
//! Pricing is always derived from the cart on demand and never stored. No
//! rounding happens here; amounts are rounded to cents only for display.

use crate::cart::Cart;
use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default sales tax rate (8%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Subtotal above which shipping is free.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Flat shipping fee charged at or below the threshold.
pub const DEFAULT_FLAT_SHIPPING_FEE: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

/// Tax and shipping settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Tax rate applied to the subtotal.
    pub tax_rate: Decimal,
    /// Shipping is free when the subtotal is strictly greater than this.
    pub free_shipping_threshold: Money,
    /// Shipping fee otherwise.
    pub flat_shipping_fee: Money,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            free_shipping_threshold: Money::new(DEFAULT_FREE_SHIPPING_THRESHOLD),
            flat_shipping_fee: Money::new(DEFAULT_FLAT_SHIPPING_FEE),
        }
    }
}

impl PricingConfig {
    /// Compute the breakdown for `cart` with these settings.
    pub fn breakdown(&self, cart: &Cart) -> PricingBreakdown {
        let subtotal: Money = cart.items().iter().map(|item| item.line_total()).sum();
        let tax = subtotal.multiply_rate(self.tax_rate);
        let shipping = self.shipping_for(subtotal);
        PricingBreakdown {
            subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }

    /// Shipping charge for a given subtotal.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal > self.free_shipping_threshold {
            Money::zero()
        } else {
            self.flat_shipping_fee
        }
    }
}

/// Price summary for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricingBreakdown {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Shipping charge.
    pub shipping: Money,
    /// subtotal + tax + shipping.
    pub total: Money,
}

impl PricingBreakdown {
    /// Check if shipping is free.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Compute the breakdown for `cart` with the default settings.
pub fn compute_breakdown(cart: &Cart) -> PricingBreakdown {
    PricingConfig::default().breakdown(cart)
}
