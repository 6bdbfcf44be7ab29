//! Product records as delivered by the catalog source.

use crate::ids::ProductId;
use crate::money::Money;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Only `id`, `name` and `price` are required on the wire; every other field
/// falls back to a default so sparse catalog files still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Top-level category (e.g., "Electronics").
    #[serde(default)]
    pub category: String,
    /// Sub-category within the category (e.g., "Smartphone").
    #[serde(default)]
    pub sub_category: Option<String>,
    /// Image reference.
    #[serde(default)]
    pub image: String,
    /// Longer description for detail views.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Average rating (0-5).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Number of reviews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
    /// Brand name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Release date as written in the catalog (RFC 3339 or YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Variant color, copied into the cart line on first add.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Variant size, copied into the cart line on first add.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Show a "new" badge.
    #[serde(default)]
    pub is_new: bool,
    /// Show a "best seller" badge.
    #[serde(default)]
    pub is_best_seller: bool,
    /// Promoted in the default sort order.
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Create a product with only the required fields set.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: String::new(),
            sub_category: None,
            image: String::new(),
            description: None,
            rating: None,
            reviews: None,
            brand: None,
            release_date: None,
            color: None,
            size: None,
            is_new: false,
            is_best_seller: false,
            featured: false,
        }
    }

    /// Set the category and sub-category.
    pub fn with_category(
        mut self,
        category: impl Into<String>,
        sub_category: Option<&str>,
    ) -> Self {
        self.category = category.into();
        self.sub_category = sub_category.map(str::to_string);
        self
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the color and size variant fields.
    pub fn with_variant(mut self, color: Option<&str>, size: Option<&str>) -> Self {
        self.color = color.map(str::to_string);
        self.size = size.map(str::to_string);
        self
    }

    /// Check if the category matches, ignoring case.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }

    /// Parse `release_date`. Unparsable dates yield `None`.
    pub fn released_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.release_date.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_catalog_json() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Galaxy Phone",
                "price": 699.99,
                "category": "Electronics",
                "subCategory": "Smartphone",
                "image": "/img/phone.jpg",
                "rating": 4.5,
                "reviews": 120,
                "brand": "Samsung",
                "releaseDate": "2024-03-01",
                "isNew": true,
                "isBestSeller": false,
                "featured": true,
                "somethingElse": "ignored"
            }"#,
        )
        .unwrap();

        assert_eq!(product.id, ProductId::new("1"));
        assert_eq!(product.price, Money::from_cents(69999));
        assert_eq!(product.sub_category.as_deref(), Some("Smartphone"));
        assert!(product.is_new);
        assert!(product.featured);
        assert!(!product.is_best_seller);
    }

    #[test]
    fn test_sparse_product() {
        let product: Product =
            serde_json::from_str(r#"{"id": "a", "name": "Thing", "price": 5}"#).unwrap();
        assert_eq!(product.category, "");
        assert!(product.brand.is_none());
        assert!(!product.featured);
    }

    #[test]
    fn test_missing_price_is_rejected() {
        assert!(serde_json::from_str::<Product>(r#"{"id": 1, "name": "x"}"#).is_err());
    }

    #[test]
    fn test_released_at() {
        let mut product = Product::new("1", "x", Money::zero());
        assert!(product.released_at().is_none());

        product.release_date = Some("2023-06-15".to_string());
        let date = product.released_at().unwrap();
        assert_eq!(date.to_rfc3339(), "2023-06-15T00:00:00+00:00");

        product.release_date = Some("2023-06-15T10:30:00Z".to_string());
        assert!(product.released_at().unwrap() > date);

        product.release_date = Some("soon".to_string());
        assert!(product.released_at().is_none());
    }

    #[test]
    fn test_in_category_ignores_case() {
        let product = Product::new("1", "Lipstick", Money::from_major(12))
            .with_category("cosmetics", Some("makeup"));
        assert!(product.in_category("Cosmetics"));
        assert!(!product.in_category("Clothes"));
    }
}
