//! Product catalog module.
//!
//! Contains the product record, the validated catalog, and the sources and
//! loader that build it.

mod loader;
mod product;
mod source;
mod store;

pub use loader::{load_catalog, parse_catalog};
pub use product::Product;
#[cfg(feature = "http")]
pub use source::HttpCatalogSource;
pub use source::{CatalogPayload, CatalogSource, FileCatalogSource, StaticCatalogSource};
pub use store::Catalog;
