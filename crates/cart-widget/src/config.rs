//! Widget configuration
//!
//! Every field has a default matching the storefront as deployed, so an empty
//! TOML document is a valid configuration. Environment overrides are applied
//! on top of the file.

use cart_core::PriceFormat;
use cart_store::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding [`WidgetConfig::storage_key`]
pub const ENV_STORAGE_KEY: &str = "CART_STORAGE_KEY";
/// Environment variable overriding [`HandoffConfig::contact_number`]
pub const ENV_CONTACT_NUMBER: &str = "CART_CONTACT_NUMBER";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of its allowed domain
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Checkout handoff settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandoffConfig {
    /// Messaging endpoint base
    pub endpoint: String,
    /// Contact number appended to the endpoint (digits only)
    pub contact_number: String,
    /// First line of the order message
    pub greeting: String,
    /// Last line of the order message
    pub closing: String,
    /// Notice shown when checking out an empty cart
    pub empty_cart_notice: String,
    /// Append a `Total:` line before the closing
    pub include_total: bool,
    /// Empty the stored cart once the handoff navigation has been issued
    pub clear_after_checkout: bool,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://wa.me".to_string(),
            contact_number: "2347061724876".to_string(),
            greeting: "Hello! I'd like to order the following items:".to_string(),
            closing: "Please confirm availability. Thank you!".to_string(),
            empty_cart_notice: "Your cart is empty!".to_string(),
            include_total: false,
            clear_after_checkout: false,
        }
    }
}

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Storage key of the cart record
    pub storage_key: String,
    /// Message shown by the cart view when the cart is empty
    pub empty_message: String,
    /// Currency formatting for the subtotal
    pub currency: PriceFormat,
    /// Checkout handoff
    pub handoff: HandoffConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            empty_message: "Your cart is empty.".to_string(),
            currency: PriceFormat::naira(),
            handoff: HandoffConfig::default(),
        }
    }
}

impl WidgetConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With storage key
    #[inline]
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// With contact number
    #[inline]
    #[must_use]
    pub fn with_contact_number(mut self, number: impl Into<String>) -> Self {
        self.handoff.contact_number = number.into();
        self
    }

    /// With total line in the order message
    #[inline]
    #[must_use]
    pub fn with_total_line(mut self, include: bool) -> Self {
        self.handoff.include_total = include;
        self
    }

    /// With cart cleared after checkout
    #[inline]
    #[must_use]
    pub fn with_clear_after_checkout(mut self, clear: bool) -> Self {
        self.handoff.clear_after_checkout = clear;
        self
    }

    /// Parse TOML document
    ///
    /// # Errors
    /// Malformed TOML or a value failing [`WidgetConfig::validate`].
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load TOML file, then apply environment overrides
    ///
    /// # Errors
    /// Unreadable file, malformed TOML or invalid values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str::<Self>(&text)?.with_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Default configuration with environment overrides
    ///
    /// # Errors
    /// An override failing [`WidgetConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default().with_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_STORAGE_KEY) {
            self.storage_key = key;
        }
        if let Some(number) = lookup(ENV_CONTACT_NUMBER) {
            self.handoff.contact_number = number;
        }
        self
    }

    /// Check values
    ///
    /// # Errors
    /// Empty storage key, empty endpoint, or a contact number that is not
    /// all digits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "storage_key",
                reason: "must not be empty".to_string(),
            });
        }
        if self.handoff.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "handoff.endpoint",
                reason: "must not be empty".to_string(),
            });
        }
        let number = &self.handoff.contact_number;
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::Invalid {
                field: "handoff.contact_number",
                reason: format!("expected digits only, got {number:?}"),
            });
        }
        Ok(())
    }
}
