//! Cart, pricing and checkout engine for a client-side storefront.
//!
//! - **Catalog**: product records, the validated catalog, and async sources to load it
//! - **Cart**: the cart engine (pure and in-place forms) and the pricing calculator
//! - **Checkout**: the two-step checkout state machine, forms, order confirmation
//! - **Browse**: category filters, sort orders and pagination
//! - **Storefront**: the single owner of cart and checkout, with change notifications
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let catalog = Catalog::new(vec![
//!     Product::new("1", "Desk Lamp", Money::from_major(20)),
//! ])
//! .unwrap();
//!
//! let mut store = Storefront::new(catalog, PricingConfig::default());
//! store.add_product(&ProductId::new("1")).unwrap();
//! store.add_product(&ProductId::new("1")).unwrap();
//!
//! let breakdown = store.breakdown();
//! assert_eq!(breakdown.subtotal.display(), "$40.00");
//! assert_eq!(breakdown.total.display(), "$58.20");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod browse;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod storefront;

pub use error::{CatalogError, CommerceError};
pub use ids::*;
pub use money::Money;
pub use storefront::{CartSnapshot, SharedStorefront, Storefront};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CatalogError, CommerceError};
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{
        load_catalog, parse_catalog, Catalog, CatalogPayload, CatalogSource, FileCatalogSource,
        Product, StaticCatalogSource,
    };

    // Cart
    pub use crate::cart::{
        add_to_cart, clear_cart, compute_breakdown, remove_from_cart, update_quantity, Cart,
        LineItem, PricingBreakdown, PricingConfig,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutEvent, CheckoutSession, CheckoutState, CheckoutStep, CheckoutView,
        OrderConfirmation, PaymentForm, ShippingForm,
    };

    // Browse
    pub use crate::browse::{BrowseQuery, BrowseResults, Filter, Pagination, PriceBand, SortOption};

    pub use crate::config::StorefrontConfig;
    pub use crate::storefront::{CartSnapshot, SharedStorefront, Storefront};
}
