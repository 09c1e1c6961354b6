//! Cart Core
//!
//! Data model for the storefront cart.
//!
//! # Core Concepts
//!
//! - [`CartItem`]: the sole persisted entity (id, name, price text, image, quantity)
//! - [`Cart`]: ordered item list, insertion order is render order
//! - [`Quantity`]: integer quantity that can never drop below 1
//! - [`parse_price`] / [`PriceFormat`]: display-price text to number and back
//!
//! # Example
//!
//! ```rust
//! use cart_core::{Cart, CartItem, MergeOutcome, PriceFormat};
//!
//! let mut cart = Cart::new();
//! let shoe = CartItem::new(Some("sku-1".into()), "Shoe", "₦5,000", "/img/shoe.jpg");
//!
//! assert_eq!(cart.merge(shoe.clone()), MergeOutcome::Appended { index: 0 });
//! assert_eq!(
//!     cart.merge(shoe),
//!     MergeOutcome::Incremented { index: 0, quantity: 2 }
//! );
//!
//! assert_eq!(PriceFormat::naira().format(cart.total()), "₦10,000");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod cart;
mod error;
mod item;
mod price;
mod quantity;

// Re-exports
pub use cart::{Cart, MergeOutcome};
pub use error::CartError;
pub use item::CartItem;
pub use price::{parse_price, PriceFormat};
pub use quantity::Quantity;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
