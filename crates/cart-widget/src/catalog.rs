//! Catalog Capture
//!
//! Handles the add action on a product card: snapshot the card, merge it into
//! the stored cart, persist, acknowledge.

use crate::error::WidgetError;
use crate::host::Notifier;
use crate::page::ProductCard;
use cart_core::MergeOutcome;
use cart_store::{CartRepository, KeyValueStore};

/// Catalog page controller
#[derive(Debug, Clone)]
pub struct CatalogCapture<S> {
    repo: CartRepository<S>,
}

impl<S: KeyValueStore> CatalogCapture<S> {
    /// Create controller over repository
    #[inline]
    #[must_use]
    pub fn new(repo: CartRepository<S>) -> Self {
        Self { repo }
    }

    /// Add the card's product to the stored cart
    ///
    /// A product with the same name and id bumps the existing line; anything
    /// else is appended with quantity 1. The cart is read fresh and written
    /// back in full.
    ///
    /// # Errors
    /// Storage failure. Missing card fields never fail.
    pub fn add_to_cart<N: Notifier>(
        &self,
        card: &ProductCard,
        notifier: &mut N,
    ) -> Result<MergeOutcome, WidgetError> {
        let item = card.snapshot();
        let name = item.name.clone();

        let mut cart = self.repo.load()?;
        let outcome = cart.merge(item);
        self.repo.save(&cart)?;

        match outcome {
            MergeOutcome::Incremented { index, quantity } => {
                tracing::info!(%name, index, quantity, "cart line incremented");
            }
            MergeOutcome::Appended { index } => {
                tracing::info!(%name, index, "cart line appended");
            }
        }

        notifier.acknowledge(&format!("{name} added to your cart!"));
        Ok(outcome)
    }
}
