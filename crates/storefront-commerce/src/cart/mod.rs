//! Shopping cart module.
//!
//! Contains the cart engine, line items and the pricing calculator.

#[allow(clippy::module_inception)]
mod cart;
mod pricing;

pub use cart::{add_to_cart, clear_cart, remove_from_cart, update_quantity, Cart, LineItem};
pub use pricing::{
    compute_breakdown, PricingBreakdown, PricingConfig, DEFAULT_FLAT_SHIPPING_FEE,
    DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_TAX_RATE,
};
