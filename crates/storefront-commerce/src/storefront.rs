//! The storefront store: single owner of the cart and checkout session.
//!
//! Views read from the store and call its operations; they never mutate the
//! cart directly. Every change to the cart publishes a [`CartSnapshot`] on a
//! `watch` channel so views can re-render.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use tracing::Span;

use crate::browse::{BrowseQuery, BrowseResults};
use crate::cart::{Cart, PricingBreakdown, PricingConfig};
use crate::catalog::{load_catalog, Catalog, CatalogSource, FileCatalogSource, Product};
use crate::checkout::{
    CheckoutSession, CheckoutStep, CheckoutView, OrderConfirmation, PaymentForm, ShippingForm,
};
use crate::config::{BrowseConfig, CatalogConfig, StorefrontConfig};
use crate::error::CommerceError;
use crate::ids::{ProductId, SessionId};

/// A storefront shared between threads. All mutations serialize on the lock.
pub type SharedStorefront = Arc<Mutex<Storefront>>;

/// What subscribers see after each cart change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSnapshot {
    /// The cart contents.
    pub cart: Cart,
    /// Prices for `cart`.
    pub breakdown: PricingBreakdown,
    /// Badge count.
    pub item_count: i64,
}

impl CartSnapshot {
    fn of(cart: &Cart, pricing: &PricingConfig) -> Self {
        Self {
            cart: cart.clone(),
            breakdown: pricing.breakdown(cart),
            item_count: cart.item_count(),
        }
    }
}

/// Storefront state for one shopper session.
pub struct Storefront {
    catalog: Catalog,
    pricing: PricingConfig,
    browse: BrowseConfig,
    cart: Cart,
    checkout: Option<CheckoutSession>,
    session_id: SessionId,
    span: Span,
    snapshots: watch::Sender<CartSnapshot>,
}

impl Storefront {
    /// Create a storefront over a loaded catalog.
    pub fn new(catalog: Catalog, pricing: PricingConfig) -> Self {
        Self::build(catalog, pricing, BrowseConfig::default())
    }

    /// Create a storefront using the pricing and browse sections of `config`.
    pub fn with_config(catalog: Catalog, config: &StorefrontConfig) -> Self {
        Self::build(catalog, config.pricing.clone(), config.browse)
    }

    /// Load the catalog named by `config` and create a storefront.
    ///
    /// A catalog that cannot be loaded is fatal.
    pub async fn open(config: &StorefrontConfig) -> Result<Self, CommerceError> {
        let source = catalog_source(&config.catalog);
        let catalog = load_catalog(&*source).await?;
        Ok(Self::with_config(catalog, config))
    }

    fn build(catalog: Catalog, pricing: PricingConfig, browse: BrowseConfig) -> Self {
        let cart = Cart::new();
        let (snapshots, _) = watch::channel(CartSnapshot::of(&cart, &pricing));
        let session_id = SessionId::generate();
        let span = storefront_observability::session_span(session_id.as_str());
        Self {
            catalog,
            pricing,
            browse,
            cart,
            checkout: None,
            session_id,
            span,
            snapshots,
        }
    }

    /// Move the storefront behind a lock for multi-threaded hosts.
    pub fn into_shared(self) -> SharedStorefront {
        Arc::new(Mutex::new(self))
    }

    /// Id used to correlate this session's log events.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    // Cart operations

    /// Add one unit of `product` to the cart.
    pub fn add_to_cart(&mut self, product: &Product) {
        let span = self.span.clone();
        let _guard = span.enter();
        self.cart.add_product(product);
        self.publish();
    }

    /// Add one unit of the catalog product with `id`.
    pub fn add_product(&mut self, id: &ProductId) -> Result<(), CommerceError> {
        let span = self.span.clone();
        let _guard = span.enter();
        let product = self.catalog.get(id).ok_or_else(|| {
            tracing::warn!(product_id = %id, "add to cart for unknown product");
            CommerceError::ProductNotFound(id.to_string())
        })?;
        self.cart.add_product(product);
        self.publish();
        Ok(())
    }

    /// Remove the line for `id`.
    pub fn remove_from_cart(&mut self, id: &ProductId) {
        let span = self.span.clone();
        let _guard = span.enter();
        self.cart.remove(id);
        self.publish();
    }

    /// Set the quantity for `id`. Below 1 removes the line.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        let span = self.span.clone();
        let _guard = span.enter();
        self.cart.update_quantity(id, quantity);
        self.publish();
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        let span = self.span.clone();
        let _guard = span.enter();
        self.cart.clear();
        self.publish();
    }

    // Read access

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    /// Current price breakdown.
    pub fn breakdown(&self) -> PricingBreakdown {
        self.pricing.breakdown(&self.cart)
    }

    /// A query with the configured page size.
    pub fn browse_query(&self) -> BrowseQuery {
        BrowseQuery::new().with_per_page(self.browse.per_page)
    }

    /// Run a browse query over the catalog.
    pub fn browse(&self, query: &BrowseQuery) -> BrowseResults<&Product> {
        query.apply(self.catalog.products())
    }

    /// Receive a snapshot after every cart change.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.snapshots.subscribe()
    }

    // Checkout

    /// Enter checkout, starting a fresh session unless one is in progress.
    pub fn begin_checkout(&mut self) -> CheckoutView<'_> {
        let _guard = self.span.enter();
        if self
            .checkout
            .as_ref()
            .is_some_and(CheckoutSession::order_placed)
        {
            self.checkout = None;
        }
        let session = self.checkout.get_or_insert_with(|| {
            let session = CheckoutSession::new();
            tracing::info!(checkout_id = %session.id(), "checkout started");
            session
        });
        session.view(&self.cart)
    }

    /// The current checkout session, if any.
    pub fn checkout(&self) -> Option<&CheckoutSession> {
        self.checkout.as_ref()
    }

    /// What the checkout page should show, if checkout has begun.
    pub fn checkout_view(&self) -> Option<CheckoutView<'_>> {
        self.checkout.as_ref().map(|s| s.view(&self.cart))
    }

    /// Submit the shipping form.
    pub fn submit_shipping(&mut self, form: ShippingForm) -> Result<CheckoutStep, CommerceError> {
        let _guard = self.span.enter();
        let session = self
            .checkout
            .as_mut()
            .ok_or(CommerceError::NoActiveCheckout)?;
        session.submit_shipping(&self.cart, form)
    }

    /// Submit the payment form, placing the order and clearing the cart.
    pub fn submit_payment(
        &mut self,
        form: PaymentForm,
    ) -> Result<OrderConfirmation, CommerceError> {
        let span = self.span.clone();
        let _guard = span.enter();
        let session = self
            .checkout
            .as_mut()
            .ok_or(CommerceError::NoActiveCheckout)?;
        let confirmation = session.submit_payment(&mut self.cart, &self.pricing, form)?;
        self.publish();
        Ok(confirmation)
    }

    /// Go back from payment to shipping.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        let _guard = self.span.enter();
        let session = self
            .checkout
            .as_mut()
            .ok_or(CommerceError::NoActiveCheckout)?;
        session.go_back()
    }

    fn publish(&self) {
        let next = CartSnapshot::of(&self.cart, &self.pricing);
        self.snapshots.send_if_modified(|current| {
            if current.cart == next.cart {
                return false;
            }
            *current = next;
            true
        });
    }
}

#[cfg(feature = "http")]
fn catalog_source(config: &CatalogConfig) -> Box<dyn CatalogSource> {
    match &config.url {
        Some(url) => Box::new(crate::catalog::HttpCatalogSource::new(url.clone())),
        None => Box::new(FileCatalogSource::new(config.path.clone())),
    }
}

#[cfg(not(feature = "http"))]
fn catalog_source(config: &CatalogConfig) -> Box<dyn CatalogSource> {
    if let Some(url) = &config.url {
        tracing::warn!(%url, "catalog.url needs the http feature; reading catalog.path instead");
    }
    Box::new(FileCatalogSource::new(config.path.clone()))
}
