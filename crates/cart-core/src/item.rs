//! Cart item

use crate::price::parse_price;
use crate::quantity::Quantity;
use serde::{Deserialize, Deserializer, Serialize};

/// One persisted cart line
///
/// Field order matches the stored JSON layout:
/// `{"id", "name", "price", "image", "quantity"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier, absent when the product card carries none
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    /// Trimmed display name
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: String,
    /// Display price text, e.g. `"₦5,000"`
    #[serde(default, deserialize_with = "deserialize_text")]
    pub price: String,
    /// Image locator
    #[serde(default, deserialize_with = "deserialize_text")]
    pub image: String,
    /// Quantity (minimum 1)
    #[serde(default)]
    pub quantity: Quantity,
}

impl CartItem {
    /// Create item with quantity 1
    #[must_use]
    pub fn new(
        id: Option<String>,
        name: impl Into<String>,
        price: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price: price.into(),
            image: image.into(),
            quantity: Quantity::ONE,
        }
    }

    /// With quantity
    #[inline]
    #[must_use]
    pub fn with_quantity(mut self, quantity: impl Into<Quantity>) -> Self {
        self.quantity = quantity.into();
        self
    }

    /// Same product for merge purposes: equal name and equal id
    ///
    /// A missing id only matches another missing id.
    #[inline]
    #[must_use]
    pub fn same_product(&self, other: &Self) -> bool {
        self.name == other.name && self.id == other.id
    }

    /// Numeric unit price derived from the display text
    #[inline]
    #[must_use]
    pub fn unit_price(&self) -> f64 {
        parse_price(Some(&self.price))
    }

    /// Unit price times quantity
    #[inline]
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.unit_price() * f64::from(self.quantity.get())
    }
}

/// Ids may have been written as strings, numbers or null
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Text fields read null or structured values as empty, scalars as their text
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}
