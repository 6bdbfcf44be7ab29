//! Catalog browsing module.
//!
//! Read-only category views: filters, sort orders and pagination over the
//! in-memory catalog.

mod filter;
mod query;
mod results;

pub use filter::{normalize_sub_category, Filter, PriceBand};
pub use query::{BrowseQuery, SortOption, DEFAULT_PER_PAGE};
pub use results::{BrowseResults, Pagination};
