//! The persisted cart record
//!
//! The whole cart is stored as one JSON array under a single key and is
//! always read and written in full.

use crate::error::StoreError;
use crate::kv::KeyValueStore;
use cart_core::{Cart, CartItem};

/// Key the cart is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Reads and writes the cart record
#[derive(Debug, Clone)]
pub struct CartRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartRepository<S> {
    /// Create repository using the default key
    #[inline]
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Create repository with custom key
    #[inline]
    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Storage key
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the cart
    ///
    /// An absent record is an empty cart. A record that is not a JSON array
    /// is logged and read as an empty cart; array elements that are not
    /// objects are skipped. Quantities are normalized to at least 1.
    ///
    /// # Errors
    /// Only backend failures.
    pub fn load(&self) -> Result<Cart, StoreError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Cart::new());
        };
        Ok(decode_cart(&self.key, &raw))
    }

    /// Persist the whole cart
    ///
    /// # Errors
    /// Serialization or backend failure.
    pub fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        let raw = serde_json::to_string(cart)?;
        self.store.set(&self.key, &raw)?;
        tracing::debug!(key = %self.key, items = cart.len(), "cart persisted");
        Ok(())
    }

    /// Persist an empty cart
    ///
    /// # Errors
    /// Backend failure.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.save(&Cart::new())
    }
}

fn decode_cart(key: &str, raw: &str) -> Cart {
    let values = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(values)) => values,
        Ok(serde_json::Value::Null) => return Cart::new(),
        Ok(other) => {
            tracing::warn!(key, kind = json_kind(&other), "stored cart is not an array, starting empty");
            return Cart::new();
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "stored cart is not valid JSON, starting empty");
            return Cart::new();
        }
    };

    let items = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<CartItem>(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(key, index, error = %e, "skipping malformed cart entry");
                None
            }
        })
        .collect();
    Cart::from_items(items)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use pretty_assertions::assert_eq;

    fn repo_with(raw: &str) -> CartRepository<MemoryStore> {
        CartRepository::new(MemoryStore::with_value(DEFAULT_STORAGE_KEY, raw))
    }

    #[test]
    fn absent_record_is_empty() {
        let repo = CartRepository::new(MemoryStore::new());
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn null_and_garbage_are_empty() {
        assert!(repo_with("null").load().unwrap().is_empty());
        assert!(repo_with("{not json").load().unwrap().is_empty());
        assert!(repo_with(r#"{"name":"Shoe"}"#).load().unwrap().is_empty());
    }

    #[test]
    fn skips_non_object_entries() {
        let repo = repo_with(r#"[1, {"name":"Shoe","price":"₦5,000","quantity":2}, "x"]"#);
        let cart = repo.load().unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0).unwrap().name, "Shoe");
    }

    #[test]
    fn keeps_entries_with_null_fields() {
        let repo = repo_with(
            r#"[{"name":"Shoe","image":null,"price":5000,"quantity":2},{"id":"1","name":"Sock","price":null,"image":"/s.jpg"}]"#,
        );
        let cart = repo.load().unwrap();
        assert_eq!(cart.len(), 2);
        let shoe = cart.get(0).unwrap();
        assert_eq!(shoe.image, "");
        assert_eq!(shoe.price, "5000");
        assert_eq!(shoe.quantity.get(), 2);
        assert_eq!(cart.get(1).unwrap().price, "");
    }

    #[test]
    fn normalizes_quantities_on_load() {
        let repo = repo_with(
            r#"[{"name":"A","quantity":0},{"name":"B","quantity":-3},{"name":"C","quantity":2.9},{"name":"D"}]"#,
        );
        let quantities: Vec<u32> = repo
            .load()
            .unwrap()
            .iter()
            .map(|i| i.quantity.get())
            .collect();
        assert_eq!(quantities, vec![1, 1, 2, 1]);
    }

    #[test]
    fn save_then_load() {
        let repo = CartRepository::with_key(MemoryStore::new(), "basket");
        let mut cart = Cart::new();
        cart.merge(CartItem::new(Some("7".into()), "Shoe", "₦5,000", "/s.jpg"));
        cart.merge(CartItem::new(Some("7".into()), "Shoe", "₦5,000", "/s.jpg"));
        repo.save(&cart).unwrap();

        assert_eq!(repo.key(), "basket");
        assert!(repo.store().get("cart").unwrap().is_none());
        assert_eq!(repo.load().unwrap(), cart);
    }

    #[test]
    fn clear_writes_empty_array() {
        let repo = repo_with(r#"[{"name":"A"}]"#);
        repo.clear().unwrap();
        assert_eq!(repo.store().get(DEFAULT_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }
}
