//! Checkout flow state machine.
//!
//! Two steps, shipping then payment, ending in a placed order. The full
//! transition table lives in [`CheckoutStep::next`]; the session methods add
//! the guards (non-empty cart, complete forms) on top of it.

use crate::cart::{Cart, PricingConfig};
use crate::checkout::{OrderConfirmation, PaymentForm, ShippingForm};
use crate::ids::CheckoutId;
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    /// Shipping details.
    Shipping,
    /// Payment details.
    Payment,
    /// Order placed.
    Placed,
}

impl CheckoutStep {
    /// Lowercase key used in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Placed => "placed",
        }
    }

    /// Heading shown on the checkout page.
    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Placed => "Order Placed",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Shipping => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Placed => 3,
        }
    }

    /// The step reached by applying `event`, if the transition exists.
    pub fn next(self, event: CheckoutEvent) -> Option<CheckoutStep> {
        match (self, event) {
            (CheckoutStep::Shipping, CheckoutEvent::SubmitShipping) => Some(CheckoutStep::Payment),
            (CheckoutStep::Payment, CheckoutEvent::SubmitPayment) => Some(CheckoutStep::Placed),
            (CheckoutStep::Payment, CheckoutEvent::GoBack) => Some(CheckoutStep::Shipping),
            _ => None,
        }
    }
}

/// Events that drive the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutEvent {
    /// A shipping form was submitted.
    SubmitShipping,
    /// A payment form was submitted.
    SubmitPayment,
    /// The shopper asked for the previous step.
    GoBack,
}

impl CheckoutEvent {
    /// Snake-case name used in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutEvent::SubmitShipping => "submit_shipping",
            CheckoutEvent::SubmitPayment => "submit_payment",
            CheckoutEvent::GoBack => "go_back",
        }
    }
}

/// Where a checkout session is. A placed order carries its confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutState {
    /// Collecting shipping details.
    Shipping,
    /// Collecting payment details.
    Payment,
    /// Order placed; holds the confirmation.
    Placed(OrderConfirmation),
}

impl CheckoutState {
    /// The step this state corresponds to.
    pub fn step(&self) -> CheckoutStep {
        match self {
            CheckoutState::Shipping => CheckoutStep::Shipping,
            CheckoutState::Payment => CheckoutStep::Payment,
            CheckoutState::Placed(_) => CheckoutStep::Placed,
        }
    }
}

/// What the checkout page should render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckoutView<'a> {
    /// Nothing to check out.
    EmptyCart,
    /// A form step.
    Step(CheckoutStep),
    /// The order has been placed.
    Confirmation(&'a OrderConfirmation),
}

/// One pass through checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSession {
    id: CheckoutId,
    state: CheckoutState,
    shipping: ShippingForm,
    payment: PaymentForm,
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutSession {
    /// Start a session at the shipping step with blank forms.
    pub fn new() -> Self {
        Self {
            id: CheckoutId::generate(),
            state: CheckoutState::Shipping,
            shipping: ShippingForm::default(),
            payment: PaymentForm::default(),
        }
    }

    pub fn id(&self) -> &CheckoutId {
        &self.id
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        self.state.step()
    }

    /// Check if the order has been placed.
    pub fn order_placed(&self) -> bool {
        matches!(self.state, CheckoutState::Placed(_))
    }

    /// The confirmation, once placed.
    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        match &self.state {
            CheckoutState::Placed(confirmation) => Some(confirmation),
            _ => None,
        }
    }

    /// Last submitted shipping form.
    pub fn shipping(&self) -> &ShippingForm {
        &self.shipping
    }

    /// Last submitted payment form.
    pub fn payment(&self) -> &PaymentForm {
        &self.payment
    }

    /// Decide what to show for `cart`.
    ///
    /// A placed order always shows its confirmation, even though the cart is
    /// now empty.
    pub fn view<'a>(&'a self, cart: &Cart) -> CheckoutView<'a> {
        match &self.state {
            CheckoutState::Placed(confirmation) => CheckoutView::Confirmation(confirmation),
            _ if cart.is_empty() => CheckoutView::EmptyCart,
            state => CheckoutView::Step(state.step()),
        }
    }

    /// Submit the shipping form and move to payment.
    ///
    /// Only accepted at the shipping step. There the form is stored even when
    /// it is incomplete; any other step rejects it and keeps the stored form.
    pub fn submit_shipping(
        &mut self,
        cart: &Cart,
        form: ShippingForm,
    ) -> Result<CheckoutStep, CommerceError> {
        let next = self.transition(CheckoutEvent::SubmitShipping)?;
        self.shipping = form;
        self.guard_cart(cart)?;
        self.guard_form(CheckoutStep::Shipping, self.shipping.missing_fields())?;

        self.state = CheckoutState::Payment;
        tracing::info!(checkout_id = %self.id, step = next.as_str(), "shipping details accepted");
        Ok(next)
    }

    /// Submit the payment form and place the order.
    ///
    /// On success the confirmation is snapshotted from `cart`, the cart is
    /// cleared and the session moves to `Placed`, with nothing able to fail in
    /// between.
    pub fn submit_payment(
        &mut self,
        cart: &mut Cart,
        pricing: &PricingConfig,
        form: PaymentForm,
    ) -> Result<OrderConfirmation, CommerceError> {
        self.transition(CheckoutEvent::SubmitPayment)?;
        self.payment = form;
        self.guard_cart(cart)?;
        self.guard_form(CheckoutStep::Shipping, self.shipping.missing_fields())?;
        self.guard_form(CheckoutStep::Payment, self.payment.missing_fields())?;

        let confirmation = OrderConfirmation::new(
            cart.items().to_vec(),
            pricing.breakdown(cart),
            self.shipping.clone(),
        );
        cart.clear();
        tracing::info!(
            checkout_id = %self.id,
            order_id = %confirmation.order_id,
            total = %confirmation.breakdown.total,
            "order placed"
        );
        self.state = CheckoutState::Placed(confirmation.clone());
        Ok(confirmation)
    }

    /// Return from payment to shipping. Both forms are kept.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        let previous = self.transition(CheckoutEvent::GoBack)?;
        self.state = CheckoutState::Shipping;
        tracing::info!(checkout_id = %self.id, step = previous.as_str(), "checkout went back");
        Ok(previous)
    }

    fn transition(&self, event: CheckoutEvent) -> Result<CheckoutStep, CommerceError> {
        let from = self.step();
        from.next(event).ok_or_else(|| {
            tracing::warn!(
                checkout_id = %self.id,
                from = from.as_str(),
                event = event.as_str(),
                "invalid checkout transition"
            );
            CommerceError::InvalidCheckoutTransition {
                from: from.as_str(),
                event: event.as_str(),
            }
        })
    }

    fn guard_cart(&self, cart: &Cart) -> Result<(), CommerceError> {
        if cart.is_empty() {
            tracing::warn!(checkout_id = %self.id, "checkout submitted with an empty cart");
            return Err(CommerceError::EmptyCart);
        }
        Ok(())
    }

    fn guard_form(
        &self,
        step: CheckoutStep,
        missing: Vec<&'static str>,
    ) -> Result<(), CommerceError> {
        if missing.is_empty() {
            return Ok(());
        }
        tracing::warn!(
            checkout_id = %self.id,
            step = step.as_str(),
            missing = ?missing,
            "checkout form incomplete"
        );
        Err(CommerceError::CheckoutIncomplete {
            step: step.as_str(),
            missing,
        })
    }
}
