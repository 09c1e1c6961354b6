//! Error types for the page controllers
//!
//! Degraded input never lands here: bad prices read as 0, bad quantities as 1,
//! a malformed stored cart as empty. What remains is storage failure and
//! controls addressed to rows that are not rendered.

use crate::config::ConfigError;
use cart_core::CartError;
use cart_store::StoreError;

/// Widget error type
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    /// Persisting or loading the cart failed
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Cart mutation rejected
    #[error("cart error: {0}")]
    Cart(#[from] CartError),

    /// Control addressed to a row that is not rendered
    #[error("row {row} is not rendered ({rows} rows)")]
    RowOutOfRange {
        /// Requested row
        row: usize,
        /// Rendered row count
        rows: usize,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl WidgetError {
    /// Check if error came from the storage backend
    #[inline]
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}
