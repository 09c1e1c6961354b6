//! Ordered cart
//!
//! Positions are the only link between a cart line and the row rendered for
//! it: removing position `k` shifts every later line down by one.

use crate::error::CartError;
use crate::item::CartItem;
use crate::quantity::Quantity;
use serde::{Deserialize, Serialize};

/// Result of merging a product into the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Existing line for the same product was bumped
    Incremented {
        /// Position of the existing line
        index: usize,
        /// Quantity after the bump
        quantity: u32,
    },
    /// New line appended at the end
    Appended {
        /// Position of the new line
        index: usize,
    },
}

impl MergeOutcome {
    /// Position of the affected line
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Incremented { index, .. } | Self::Appended { index } => index,
        }
    }
}

/// Ordered list of cart items
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create empty cart
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create cart from items in order
    #[inline]
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Items in render order
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of lines
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart has no lines
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate lines in order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Line at position
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CartItem> {
        self.items.get(index)
    }

    /// Position of the first line for the same product
    #[must_use]
    pub fn position_of(&self, item: &CartItem) -> Option<usize> {
        self.items.iter().position(|i| i.same_product(item))
    }

    /// Add product: bump the matching line or append with quantity 1
    pub fn merge(&mut self, item: CartItem) -> MergeOutcome {
        if let Some(index) = self.position_of(&item) {
            let line = &mut self.items[index];
            line.quantity = line.quantity.increment();
            MergeOutcome::Incremented {
                index,
                quantity: line.quantity.get(),
            }
        } else {
            self.items.push(item.with_quantity(Quantity::ONE));
            MergeOutcome::Appended {
                index: self.items.len() - 1,
            }
        }
    }

    /// Remove line at position
    ///
    /// # Errors
    /// [`CartError::IndexOutOfRange`] when the position does not exist.
    pub fn remove(&mut self, index: usize) -> Result<CartItem, CartError> {
        if index >= self.items.len() {
            return Err(CartError::out_of_range(index, self.items.len()));
        }
        Ok(self.items.remove(index))
    }

    /// Overwrite quantity at position
    ///
    /// # Errors
    /// [`CartError::IndexOutOfRange`] when the position does not exist.
    pub fn set_quantity(&mut self, index: usize, quantity: Quantity) -> Result<(), CartError> {
        let len = self.items.len();
        let line = self
            .items
            .get_mut(index)
            .ok_or(CartError::out_of_range(index, len))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Sum of line totals
    #[must_use]
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total units across lines
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items
            .iter()
            .map(|i| u64::from(i.quantity.get()))
            .sum()
    }

    /// Drop every line
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Consume into items
    #[inline]
    #[must_use]
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn item(name: &str, id: Option<&str>, price: &str) -> CartItem {
        CartItem::new(id.map(str::to_string), name, price, format!("/img/{name}.jpg"))
    }

    #[test]
    fn merge_same_product_increments() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.merge(item("Shoe", Some("1"), "₦5,000")),
            MergeOutcome::Appended { index: 0 }
        );
        assert_eq!(
            cart.merge(item("Shoe", Some("1"), "₦5,000")),
            MergeOutcome::Incremented {
                index: 0,
                quantity: 2
            }
        );
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn merge_different_name_or_id_appends() {
        let mut cart = Cart::new();
        cart.merge(item("Shoe", Some("1"), "₦5,000"));
        cart.merge(item("Shoe", Some("2"), "₦5,000"));
        cart.merge(item("Sock", Some("1"), "₦500"));
        cart.merge(item("Shoe", None, "₦5,000"));
        assert_eq!(cart.len(), 4);
    }

    #[test]
    fn merge_null_ids_match() {
        let mut cart = Cart::new();
        cart.merge(item("Hat", None, "₦1,000"));
        let outcome = cart.merge(item("Hat", None, "₦1,000"));
        assert_eq!(outcome.index(), 0);
        assert_eq!(cart.get(0).unwrap().quantity.get(), 2);
    }

    #[test]
    fn merge_resets_incoming_quantity() {
        let mut cart = Cart::new();
        cart.merge(item("Hat", None, "₦1,000").with_quantity(9));
        assert_eq!(cart.get(0).unwrap().quantity, Quantity::ONE);
    }

    #[test]
    fn remove_shifts_later_lines() {
        let mut cart = Cart::from_items(vec![
            item("A", None, "₦1"),
            item("B", None, "₦2"),
            item("C", None, "₦3"),
        ]);
        let removed = cart.remove(1).unwrap();
        assert_eq!(removed.name, "B");
        let names: Vec<&str> = cart.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn remove_out_of_range() {
        let mut cart = Cart::new();
        assert_eq!(cart.remove(0), Err(CartError::out_of_range(0, 0)));
    }

    #[test]
    fn set_quantity_and_total() {
        let mut cart = Cart::from_items(vec![
            item("Shoe", None, "₦5,000"),
            item("Sock", None, "₦500"),
        ]);
        cart.set_quantity(1, Quantity::new(4)).unwrap();
        assert_eq!(cart.total(), 7_000.0);
        assert_eq!(cart.unit_count(), 5);
        assert!(cart.set_quantity(2, Quantity::ONE).is_err());
    }

    #[test]
    fn serializes_as_array() {
        let cart = Cart::from_items(vec![item("Shoe", Some("1"), "₦5,000")]);
        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }

    proptest! {
        #[test]
        fn prop_merge_keeps_products_unique(
            picks in proptest::collection::vec((0usize..3, proptest::option::of(0usize..2)), 0..40)
        ) {
            let names = ["Shoe", "Sock", "Hat"];
            let mut cart = Cart::new();
            for (n, id) in &picks {
                cart.merge(item(names[*n], id.map(|i| if i == 0 { "x" } else { "y" }), "₦100"));
            }
            for (i, a) in cart.iter().enumerate() {
                for b in cart.items()[i + 1..].iter() {
                    prop_assert!(!a.same_product(b));
                }
            }
            prop_assert_eq!(cart.unit_count(), picks.len() as u64);
        }
    }
}
