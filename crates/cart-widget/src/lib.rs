//! Cart Widget - storefront page controllers
//!
//! Three independent controllers share nothing but the persisted cart:
//! - [`CatalogCapture`]: product card add action, merge into the stored cart
//! - [`CartView`]: render rows, quantity/remove controls, subtotal sync
//! - [`OrderHandoff`]: format the order message and navigate to the messaging link
//!
//! Each controller reads the cart fresh from storage when it is activated.
//! The browser surface is modelled by [`page`] types and the [`Notifier`] /
//! [`Navigator`] seams.
//!
//! # Example
//!
//! ```rust
//! use cart_store::MemoryStore;
//! use cart_widget::{ProductCard, RecordingHost, Storefront, WidgetConfig};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), cart_widget::WidgetError> {
//! let front = Storefront::new(Arc::new(MemoryStore::new()), WidgetConfig::default());
//! let mut host = RecordingHost::default();
//!
//! let card = ProductCard::new("Shoe", "₦5,000", "/img/shoe.jpg").with_data_id("sku-1");
//! front.catalog().add_to_cart(&card, &mut host)?;
//!
//! let mut view = front.cart_view()?;
//! view.increment(0)?;
//! assert_eq!(view.subtotal_text(), "₦10,000");
//!
//! front.handoff().checkout(&mut host)?;
//! assert!(host.navigations[0].starts_with("https://wa.me/"));
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod handoff;
pub mod host;
pub mod page;
pub mod view;

// Re-exports for convenience
pub use catalog::CatalogCapture;
pub use config::{ConfigError, HandoffConfig, WidgetConfig};
pub use error::WidgetError;
pub use handoff::{encode_component, CheckoutOutcome, OrderHandoff};
pub use host::{Navigator, Notifier, RecordingHost};
pub use page::{CartContainer, CartRow, ProductCard, QuantityField, SubtotalDisplay};
pub use view::CartView;

use cart_store::{CartRepository, KeyValueStore};

/// Entry point binding one store and configuration to the page controllers
///
/// Every accessor builds a fresh controller over a fresh repository handle,
/// the way each page activates its own script.
#[derive(Debug, Clone)]
pub struct Storefront<S> {
    store: S,
    config: WidgetConfig,
}

impl<S: KeyValueStore + Clone> Storefront<S> {
    /// Create storefront over store
    #[inline]
    #[must_use]
    pub fn new(store: S, config: WidgetConfig) -> Self {
        Self { store, config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Repository for the configured storage key
    #[inline]
    #[must_use]
    pub fn repository(&self) -> CartRepository<S> {
        CartRepository::with_key(self.store.clone(), self.config.storage_key.clone())
    }

    /// Catalog page controller
    #[must_use]
    pub fn catalog(&self) -> CatalogCapture<S> {
        CatalogCapture::new(self.repository())
    }

    /// Cart page controller (loads and renders immediately)
    ///
    /// # Errors
    /// Storage failure while loading or syncing the cart.
    pub fn cart_view(&self) -> Result<CartView<S>, WidgetError> {
        CartView::activate(self.repository(), &self.config)
    }

    /// Checkout controller
    #[must_use]
    pub fn handoff(&self) -> OrderHandoff<S> {
        OrderHandoff::new(
            self.repository(),
            self.config.handoff.clone(),
            self.config.currency.clone(),
        )
    }
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
