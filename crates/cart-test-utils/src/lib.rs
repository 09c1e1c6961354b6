//! Testing utilities for the cart workspace
//!
//! Shared catalog fixtures and storefront setup.

#![allow(missing_docs)]

use cart_core::{Cart, CartItem};
use cart_store::{CartRepository, MemoryStore};
use cart_widget::{ProductCard, Storefront, WidgetConfig};
use std::sync::Arc;

pub type SharedStore = Arc<MemoryStore>;

/// Product cards as the catalog page renders them
pub fn catalog() -> Vec<ProductCard> {
    vec![
        ProductCard::new("Shoe", "₦5,000", "/static/images/shoe.jpg").with_data_id("1"),
        ProductCard::new("Sock", "₦500", "/static/images/sock.jpg").with_data_id("2"),
        ProductCard::new("Hat", "₦1,500", "/static/images/hat.jpg").with_element_id("hat-card"),
        ProductCard::new("Gift Card", "Price on request", "/static/images/gift.jpg"),
    ]
}

pub fn card(name: &str) -> ProductCard {
    catalog()
        .into_iter()
        .find(|c| c.name.as_deref() == Some(name))
        .unwrap_or_else(|| panic!("no catalog card named {name}"))
}

pub fn item(name: &str, price: &str, quantity: u32) -> CartItem {
    CartItem::new(None, name, price, format!("/static/images/{}.jpg", name.to_lowercase()))
        .with_quantity(quantity)
}

pub fn setup_storefront() -> (SharedStore, Storefront<SharedStore>) {
    setup_storefront_with(WidgetConfig::default())
}

pub fn setup_storefront_with(config: WidgetConfig) -> (SharedStore, Storefront<SharedStore>) {
    let store = Arc::new(MemoryStore::new());
    let front = Storefront::new(Arc::clone(&store), config);
    (store, front)
}

pub fn seed_cart(store: &SharedStore, items: Vec<CartItem>) {
    CartRepository::new(Arc::clone(store))
        .save(&Cart::from_items(items))
        .unwrap();
}

pub fn stored_cart(store: &SharedStore) -> Cart {
    CartRepository::new(Arc::clone(store)).load().unwrap()
}
