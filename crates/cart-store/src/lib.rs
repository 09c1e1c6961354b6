//! Cart Store
//!
//! Persistence for the single cart record.
//!
//! # Overview
//!
//! - **KeyValueStore**: string values by key, the stand-in for browser local storage
//! - **MemoryStore** / **FileStore**: in-process and JSON-file backends
//! - **CartRepository**: reads and writes the whole cart under one well-known key
//!
//! # Example
//!
//! ```rust
//! use cart_core::{Cart, CartItem};
//! use cart_store::{CartRepository, MemoryStore};
//!
//! let repo = CartRepository::new(MemoryStore::new());
//! assert!(repo.load().unwrap().is_empty());
//!
//! let mut cart = Cart::new();
//! cart.merge(CartItem::new(None, "Shoe", "₦5,000", "/img/shoe.jpg"));
//! repo.save(&cart).unwrap();
//!
//! assert_eq!(repo.load().unwrap(), cart);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod file;
pub mod kv;
pub mod repository;

// Re-exports
pub use error::StoreError;
pub use file::FileStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use repository::{CartRepository, DEFAULT_STORAGE_KEY};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
