//! Browse filter types.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Preset price bands offered on category pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBand {
    /// Below $50.
    Under50,
    /// $50 to $100 inclusive.
    From50To100,
    /// Above $100.
    Over100,
}

impl PriceBand {
    /// Parse a band key ("under50", "50to100", "over100").
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "under50" => Some(PriceBand::Under50),
            "50to100" => Some(PriceBand::From50To100),
            "over100" => Some(PriceBand::Over100),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PriceBand::Under50 => "Under $50",
            PriceBand::From50To100 => "$50 to $100",
            PriceBand::Over100 => "Over $100",
        }
    }

    /// Check if `price` falls in this band.
    pub fn contains(&self, price: Money) -> bool {
        let fifty = Money::from_major(50);
        let hundred = Money::from_major(100);
        match self {
            PriceBand::Under50 => price < fifty,
            PriceBand::From50To100 => price >= fifty && price <= hundred,
            PriceBand::Over100 => price > hundred,
        }
    }
}

/// A browse filter. A product must match every filter in a query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Category, compared case-insensitively.
    Category(String),
    /// Sub-category, compared after normalisation. "all" matches everything.
    SubCategory(String),
    /// Inclusive price bounds.
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    /// One of the preset bands.
    PriceBand(PriceBand),
    /// Brand must be one of these. An empty list matches everything.
    Brands(Vec<String>),
}

impl Filter {
    /// Create a category filter.
    pub fn category(name: impl Into<String>) -> Self {
        Filter::Category(name.into())
    }

    /// Create a sub-category filter.
    pub fn sub_category(name: impl Into<String>) -> Self {
        Filter::SubCategory(name.into())
    }

    /// Create a price range filter.
    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Create a brand filter.
    pub fn brands<I, S>(brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::Brands(brands.into_iter().map(Into::into).collect())
    }

    /// Check if `product` passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(name) => product.in_category(name),
            Filter::SubCategory(name) => {
                let wanted = normalize_sub_category(name);
                if wanted == "all" {
                    return true;
                }
                product
                    .sub_category
                    .as_deref()
                    .is_some_and(|sub| normalize_sub_category(sub) == wanted)
            }
            Filter::PriceRange { min, max } => {
                min.map_or(true, |min| product.price >= min)
                    && max.map_or(true, |max| product.price <= max)
            }
            Filter::PriceBand(band) => band.contains(product.price),
            Filter::Brands(brands) => {
                brands.is_empty()
                    || product
                        .brand
                        .as_deref()
                        .is_some_and(|brand| brands.iter().any(|b| b == brand))
            }
        }
    }
}

/// Normalise a sub-category for comparison.
///
/// Lowercases, joins whitespace runs with `-`, and folds the phone and
/// television synonyms.
pub fn normalize_sub_category(raw: &str) -> String {
    let slug = raw
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    match slug.as_str() {
        "mobile" | "phone" => "smartphone".to_string(),
        "tv" | "television" => "television".to_string(),
        _ => slug,
    }
}
