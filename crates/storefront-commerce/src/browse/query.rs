//! Browse query builder.

use crate::browse::{BrowseResults, Filter, Pagination};
use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Products shown per page unless configured otherwise.
pub const DEFAULT_PER_PAGE: usize = 12;

/// Sort options for browse results.
///
/// All sorts are stable: ties keep catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Featured products first.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceLow,
    /// Sort by price, high to low.
    PriceHigh,
    /// Sort by highest rated. Unrated counts as 0.
    Rating,
    /// Sort by newest release first. Undated counts as oldest.
    Newest,
}

impl SortOption {
    /// All options, in menu order.
    pub const ALL: [SortOption; 5] = [
        SortOption::Featured,
        SortOption::PriceLow,
        SortOption::PriceHigh,
        SortOption::Rating,
        SortOption::Newest,
    ];

    /// Parse a sort key as used in URLs.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.key() == key)
    }

    pub fn key(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
            SortOption::Rating => "rating",
            SortOption::Newest => "newest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
            SortOption::Rating => "Highest Rated",
            SortOption::Newest => "Newest",
        }
    }

    /// Sort `products` in place.
    pub fn sort(&self, products: &mut [&Product]) {
        match self {
            SortOption::Featured => products.sort_by_key(|p| !p.featured),
            SortOption::PriceLow => products.sort_by_key(|p| p.price),
            SortOption::PriceHigh => products.sort_by_key(|p| Reverse(p.price)),
            SortOption::Rating => products.sort_by(|a, b| {
                let a = a.rating.unwrap_or(0.0);
                let b = b.rating.unwrap_or(0.0);
                b.total_cmp(&a)
            }),
            SortOption::Newest => products.sort_by_cached_key(|p| Reverse(p.released_at())),
        }
    }
}

/// A browse query over the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowseQuery {
    /// Filters to apply.
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
    /// Requested page (1-indexed). Out-of-range pages are clamped.
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
}

impl Default for BrowseQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowseQuery {
    /// Create a new browse query.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort: SortOption::Featured,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Add a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set the requested page.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page size.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Check if `product` passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Filter, sort and paginate `products`.
    pub fn apply<'a, I>(&self, products: I) -> BrowseResults<&'a Product>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let mut matched: Vec<&Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        self.sort.sort(&mut matched);

        let pagination = Pagination::new(self.page, self.per_page, matched.len());
        let items = matched
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.per_page)
            .collect();

        BrowseResults::new(items, pagination)
    }
}
