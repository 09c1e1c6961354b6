//! Item quantity
//!
//! A [`Quantity`] is always at least 1. Every entry point clamps: raw control
//! text, stored JSON values, arithmetic on the value.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive item quantity (minimum 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest representable quantity
    pub const ONE: Self = Self(1);

    /// Create quantity, clamping to minimum 1
    #[inline]
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.max(1))
    }

    /// Get raw value
    #[inline]
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Quantity plus one (saturating)
    #[inline]
    #[must_use]
    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Quantity minus one, never below 1
    #[inline]
    #[must_use]
    pub fn decrement(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }

    /// Floor a number and clamp it into range
    ///
    /// Non-finite input (NaN, infinities from garbage text) becomes 1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_f64_lossy(value: f64) -> Self {
        if !value.is_finite() {
            return Self::ONE;
        }
        let floored = value.floor();
        if floored < 1.0 {
            Self::ONE
        } else if floored >= f64::from(u32::MAX) {
            Self(u32::MAX)
        } else {
            Self(floored as u32)
        }
    }

    /// Parse the text of a numeric quantity field
    ///
    /// Blank text reads as 1, anything unparseable reads as 1, fractions are
    /// floored.
    #[must_use]
    pub fn parse_field(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::ONE;
        }
        trimmed
            .parse::<f64>()
            .map_or(Self::ONE, Self::from_f64_lossy)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(QuantityVisitor)
    }
}

/// Lenient visitor: stored carts may carry floats, strings or nulls
struct QuantityVisitor;

impl<'de> Visitor<'de> for QuantityVisitor {
    type Value = Quantity;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a quantity")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Quantity, E> {
        Ok(Quantity::new(u32::try_from(v).unwrap_or(u32::MAX)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Quantity, E> {
        Ok(u64::try_from(v).map_or(Quantity::ONE, |v| {
            Quantity::new(u32::try_from(v).unwrap_or(u32::MAX))
        }))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Quantity, E> {
        Ok(Quantity::from_f64_lossy(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Quantity, E> {
        Ok(Quantity::parse_field(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Quantity, E> {
        Ok(Quantity::ONE)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Quantity, E> {
        Ok(Quantity::ONE)
    }

    fn visit_none<E: de::Error>(self) -> Result<Quantity, E> {
        Ok(Quantity::ONE)
    }
}
