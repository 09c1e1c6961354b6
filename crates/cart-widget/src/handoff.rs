//! Order Handoff
//!
//! Formats the stored cart as a numbered plain-text order and hands it to the
//! external messaging link. One-way: nothing comes back.

use crate::config::HandoffConfig;
use crate::error::WidgetError;
use crate::host::{Navigator, Notifier};
use cart_core::{Cart, PriceFormat};
use cart_store::{CartRepository, KeyValueStore};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Write;

/// Characters left as-is by `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode text for use as one URL component
///
/// ```rust
/// use cart_widget::encode_component;
///
/// assert_eq!(encode_component("1. Shoe - 2 x ₦5,000"), "1.%20Shoe%20-%202%20x%20%E2%82%A65%2C000");
/// assert_eq!(encode_component("I'd like (2)!"), "I'd%20like%20(2)!");
/// ```
#[must_use]
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Result of a checkout action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Cart was empty: notice shown, no navigation
    EmptyCart,
    /// Navigation issued
    Navigated {
        /// Plain-text order message
        message: String,
        /// Link the page was sent to
        url: String,
    },
}

/// Checkout controller
#[derive(Debug, Clone)]
pub struct OrderHandoff<S> {
    repo: CartRepository<S>,
    config: HandoffConfig,
    format: PriceFormat,
}

impl<S: KeyValueStore> OrderHandoff<S> {
    /// Create controller
    #[inline]
    #[must_use]
    pub fn new(repo: CartRepository<S>, config: HandoffConfig, format: PriceFormat) -> Self {
        Self {
            repo,
            config,
            format,
        }
    }

    /// Order message for cart
    ///
    /// ```text
    /// <greeting>
    ///
    /// 1. <name> - <quantity> x <price>
    /// ...
    ///
    /// <closing>
    /// ```
    #[must_use]
    pub fn message(&self, cart: &Cart) -> String {
        let mut message = String::new();
        message.push_str(&self.config.greeting);
        message.push_str("\n\n");

        for (index, item) in cart.iter().enumerate() {
            // writing into a String cannot fail
            let _ = writeln!(
                message,
                "{}. {} - {} x {}",
                index + 1,
                item.name,
                item.quantity,
                item.price
            );
        }

        if self.config.include_total {
            let _ = writeln!(message, "\nTotal: {}", self.format.format(cart.total()));
        }

        message.push('\n');
        message.push_str(&self.config.closing);
        message
    }

    /// Messaging link carrying message
    #[must_use]
    pub fn link(&self, message: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.contact_number,
            encode_component(message)
        )
    }

    /// Checkout action
    ///
    /// Empty cart: blocking notice, no navigation. Otherwise one navigation
    /// to the messaging link; when configured, the stored cart is emptied
    /// afterwards.
    ///
    /// # Errors
    /// Storage failure.
    pub fn checkout<H>(&self, host: &mut H) -> Result<CheckoutOutcome, WidgetError>
    where
        H: Notifier + Navigator,
    {
        let cart = self.repo.load()?;
        if cart.is_empty() {
            tracing::info!("checkout with empty cart");
            host.blocking_notice(&self.config.empty_cart_notice);
            return Ok(CheckoutOutcome::EmptyCart);
        }

        let message = self.message(&cart);
        let url = self.link(&message);
        tracing::info!(items = cart.len(), units = cart.unit_count(), "handing off order");
        host.navigate(&url);

        if self.config.clear_after_checkout {
            self.repo.clear()?;
            tracing::debug!("cart cleared after checkout");
        }

        Ok(CheckoutOutcome::Navigated { message, url })
    }
}
