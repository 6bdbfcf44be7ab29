//! The validated, read-only product catalog.

use crate::catalog::Product;
use crate::error::CatalogError;
use crate::ids::ProductId;
use std::collections::{HashMap, HashSet};

/// All products known to the storefront.
///
/// Built once from a catalog source and never mutated afterwards. Product ids
/// are unique and prices are non-negative.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and negative prices.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if product.price.is_negative() {
                return Err(CatalogError::NegativePrice {
                    id: product.id.to_string(),
                });
            }
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateProductId(product.id.to_string()));
            }
        }
        Ok(Self { products, index })
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct non-empty categories, in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| !c.is_empty() && seen.insert(*c))
            .collect()
    }

    /// Distinct brands of the products in `category`, in first-seen order.
    pub fn brands_in(&self, category: &str) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .filter(|p| p.in_category(category))
            .filter_map(|p| p.brand.as_deref())
            .filter(|b| !b.is_empty() && seen.insert(*b))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: &str, category: &str, brand: Option<&str>) -> Product {
        let mut p = Product::new(id, format!("Product {id}"), Money::from_major(10))
            .with_category(category, None);
        p.brand = brand.map(str::to_string);
        p
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::new(vec![
            product("1", "Electronics", None),
            product("2", "Clothes", None),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(&ProductId::new("2")).unwrap().category, "Clothes");
        assert!(catalog.get(&ProductId::new("3")).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Catalog::new(vec![
            product("1", "Electronics", None),
            product("1", "Clothes", None),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateProductId("1".to_string()));
    }

    #[test]
    fn test_negative_price_rejected() {
        let bad = Product::new("9", "Refund", Money::from_cents(-100));
        let err = Catalog::new(vec![bad]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::NegativePrice {
                id: "9".to_string()
            }
        );
    }

    #[test]
    fn test_free_product_allowed() {
        let free = Product::new("0", "Sticker", Money::zero());
        assert!(Catalog::new(vec![free]).is_ok());
    }

    #[test]
    fn test_categories_and_brands() {
        let catalog = Catalog::new(vec![
            product("1", "Electronics", Some("Apple")),
            product("2", "Clothes", Some("Levi's")),
            product("3", "electronics", Some("Samsung")),
            product("4", "Electronics", Some("Apple")),
            product("5", "Electronics", None),
        ])
        .unwrap();

        assert_eq!(
            catalog.categories(),
            vec!["Electronics", "Clothes", "electronics"]
        );
        assert_eq!(catalog.brands_in("Electronics"), vec!["Apple", "Samsung"]);
        assert!(catalog.brands_in("Cosmetics").is_empty());
    }
}
