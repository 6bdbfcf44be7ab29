//! Cart and line item types.
//!
//! The cart is an ordered list of line items keyed by product id. Each
//! operation exists twice: an in-place method used by the single owner of the
//! cart, and a pure function returning a new cart. Both go through the same
//! code path.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use serde::Serialize;

/// A shopping cart.
///
/// Items are private so the invariants hold: one line per product id,
/// quantities of at least 1, insertion order preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`.
    ///
    /// If a line with the same id exists its quantity goes up by one and the
    /// existing snapshot is kept. Otherwise a new line is appended.
    pub fn add_product(&mut self, product: &Product) {
        match self.position(&product.id) {
            Some(i) => {
                let item = &mut self.items[i];
                item.quantity = item.quantity.saturating_add(1);
                tracing::debug!(product_id = %item.id, quantity = item.quantity, "cart line incremented");
            }
            None => {
                self.items.push(LineItem::from_product(product));
                tracing::debug!(product_id = %product.id, quantity = 1, "cart line added");
            }
        }
    }

    /// Remove the line for `id`. Absent ids are ignored.
    pub fn remove(&mut self, id: &ProductId) {
        if let Some(i) = self.position(id) {
            self.items.remove(i);
            tracing::debug!(product_id = %id, quantity = 0, "cart line removed");
        }
    }

    /// Set the quantity for `id`. Anything below 1 removes the line.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        if quantity < 1 {
            self.remove(id);
            return;
        }
        if let Some(i) = self.position(id) {
            self.items[i].quantity = quantity;
            tracing::debug!(product_id = %id, quantity, "cart line quantity set");
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            tracing::debug!(lines = self.items.len(), "cart cleared");
        }
        self.items.clear();
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get the line for `id`.
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Check if a line for `id` exists.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.position(id).is_some()
    }

    /// Total number of units (the cart badge count).
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }
}

/// Return a copy of `cart` with one unit of `product` added.
pub fn add_to_cart(cart: &Cart, product: &Product) -> Cart {
    let mut next = cart.clone();
    next.add_product(product);
    next
}

/// Return a copy of `cart` without the line for `id`.
pub fn remove_from_cart(cart: &Cart, id: &ProductId) -> Cart {
    let mut next = cart.clone();
    next.remove(id);
    next
}

/// Return a copy of `cart` with the quantity for `id` set.
pub fn update_quantity(cart: &Cart, id: &ProductId, quantity: i64) -> Cart {
    let mut next = cart.clone();
    next.update_quantity(id, quantity);
    next
}

/// Return an empty cart.
pub fn clear_cart(_cart: &Cart) -> Cart {
    Cart::new()
}

/// A line in the cart.
///
/// Holds a snapshot of the product fields taken when the line was created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    /// Product id; unique within a cart.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Image reference.
    pub image: String,
    /// Variant color.
    pub color: Option<String>,
    /// Variant size.
    pub size: Option<String>,
    /// Quantity, always at least 1.
    pub quantity: i64,
}

impl LineItem {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            color: product.color.clone(),
            size: product.size.clone(),
            quantity: 1,
        }
    }

    /// Price times quantity.
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(id, format!("Product {id}"), Money::from_cents(cents))
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        cart.add_product(&product("1", 1000));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.items()[0].name, "Product 1");
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        let p = product("1", 1000);
        cart.add_product(&p);
        cart.add_product(&p);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_merge_keeps_first_variant() {
        let mut cart = Cart::new();
        cart.add_product(&product("1", 1000).with_variant(Some("red"), Some("M")));
        cart.add_product(&product("1", 1000).with_variant(Some("blue"), Some("L")));

        let line = cart.get(&ProductId::new("1")).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.color.as_deref(), Some("red"));
        assert_eq!(line.size.as_deref(), Some("M"));
    }

    #[test]
    fn test_insertion_order() {
        let mut cart = Cart::new();
        cart.add_product(&product("b", 100));
        cart.add_product(&product("a", 100));
        cart.add_product(&product("b", 100));

        let ids: Vec<_> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add_product(&product("1", 1000));
        cart.update_quantity(&ProductId::new("1"), 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_update_quantity_below_one_removes() {
        let mut cart = Cart::new();
        cart.add_product(&product("1", 1000));
        cart.add_product(&product("2", 1000));

        cart.update_quantity(&ProductId::new("1"), 0);
        assert!(!cart.contains(&ProductId::new("1")));

        cart.update_quantity(&ProductId::new("2"), -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_product(&product("1", 1000));
        let before = cart.clone();

        cart.remove(&ProductId::new("99"));
        cart.update_quantity(&ProductId::new("99"), 4);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_product(&product("1", 1000));
        cart.remove(&ProductId::new("1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_saturates() {
        let mut cart = Cart::new();
        let p = product("1", 1);
        cart.add_product(&p);
        cart.update_quantity(&p.id, i64::MAX);
        cart.add_product(&p);
        assert_eq!(cart.get(&p.id).unwrap().quantity, i64::MAX);
    }

    #[test]
    fn test_pure_forms_leave_input_untouched() {
        let p = product("1", 250);
        let empty = Cart::new();

        let one = add_to_cart(&empty, &p);
        assert!(empty.is_empty());
        assert_eq!(one.item_count(), 1);

        let three = update_quantity(&one, &p.id, 3);
        assert_eq!(one.item_count(), 1);
        assert_eq!(three.item_count(), 3);

        let gone = remove_from_cart(&three, &p.id);
        assert_eq!(three.len(), 1);
        assert!(gone.is_empty());

        assert!(clear_cart(&three).is_empty());
        assert_eq!(three.len(), 1);
    }

    #[test]
    fn test_line_total() {
        let mut cart = Cart::new();
        let p = product("1", 1999);
        cart.add_product(&p);
        cart.update_quantity(&p.id, 3);
        assert_eq!(cart.items()[0].line_total(), Money::from_cents(5997));
    }
}
