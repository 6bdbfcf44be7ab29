//! Commerce error types.

use thiserror::Error;

/// Errors that make a catalog load fail.
///
/// All of these are fatal: the storefront never starts with a partial catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The source could not be reached or read.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// The source answered with a non-2xx status.
    #[error("Catalog request failed with HTTP {status}")]
    HttpStatus { status: u16 },

    /// The body is not valid JSON.
    #[error("Catalog is not valid JSON: {0}")]
    Malformed(String),

    /// The top-level JSON value is not an array.
    #[error("Invalid product format: expected an array, got {found}")]
    NotAnArray { found: &'static str },

    /// An array element could not be read as a product.
    #[error("Invalid product at index {index}: {reason}")]
    InvalidProduct { index: usize, reason: String },

    /// Two products share an id.
    #[error("Duplicate product id: {0}")]
    DuplicateProductId(String),

    /// A product has a negative price.
    #[error("Product {id} has a negative price")]
    NegativePrice { id: String },
}

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Catalog load failure.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Required form fields are missing.
    #[error("Checkout incomplete at {step}: missing {}", .missing.join(", "))]
    CheckoutIncomplete {
        step: &'static str,
        missing: Vec<&'static str>,
    },

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} on {event}")]
    InvalidCheckoutTransition {
        from: &'static str,
        event: &'static str,
    },

    /// No checkout session has been started.
    #[error("No checkout in progress")]
    NoActiveCheckout,

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
