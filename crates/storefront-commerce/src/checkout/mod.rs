//! Checkout module.
//!
//! Contains the two-step checkout flow, its forms, and the order confirmation.

mod confirmation;
mod flow;
mod forms;

pub use confirmation::OrderConfirmation;
pub use flow::{CheckoutEvent, CheckoutSession, CheckoutState, CheckoutStep, CheckoutView};
pub use forms::{PaymentForm, ShippingForm, DEFAULT_COUNTRY};
