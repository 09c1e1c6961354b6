//! Page surface model
//!
//! Plain data standing in for the storefront markup: product cards on the
//! catalog page, and the cart container with its rows and subtotal display on
//! the cart page. Values are kept as the text the page would show, so the
//! controllers see exactly what a user could have typed.

use cart_core::{parse_price, CartItem, Quantity};

/// Product card on the catalog page
///
/// Every field is optional: a card with missing pieces still produces an
/// item, with empty text in their place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCard {
    /// Text of the name element
    pub name: Option<String>,
    /// Text of the price element
    pub price: Option<String>,
    /// Image source
    pub image: Option<String>,
    /// `data-id` attribute
    pub data_id: Option<String>,
    /// Element id attribute
    pub element_id: Option<String>,
}

impl ProductCard {
    /// Create card with name, price and image
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price.into()),
            image: Some(image.into()),
            data_id: None,
            element_id: None,
        }
    }

    /// With `data-id` attribute
    #[inline]
    #[must_use]
    pub fn with_data_id(mut self, id: impl Into<String>) -> Self {
        self.data_id = Some(id.into());
        self
    }

    /// With element id
    #[inline]
    #[must_use]
    pub fn with_element_id(mut self, id: impl Into<String>) -> Self {
        self.element_id = Some(id.into());
        self
    }

    /// Identifier: `data-id`, else element id, else none (empty counts as absent)
    #[must_use]
    pub fn identifier(&self) -> Option<String> {
        [&self.data_id, &self.element_id]
            .into_iter()
            .flatten()
            .find(|id| !id.is_empty())
            .cloned()
    }

    /// Extract a quantity-1 cart item from the card
    #[must_use]
    pub fn snapshot(&self) -> CartItem {
        CartItem::new(
            self.identifier(),
            self.name.as_deref().unwrap_or_default().trim(),
            self.price.as_deref().unwrap_or_default().trim(),
            self.image.clone().unwrap_or_default(),
        )
    }
}

/// Numeric quantity input
///
/// Holds raw text like an `<input type="number">`; reading it always yields a
/// valid [`Quantity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityField {
    value: String,
}

impl QuantityField {
    /// Field showing quantity
    #[inline]
    #[must_use]
    pub fn new(quantity: Quantity) -> Self {
        Self {
            value: quantity.to_string(),
        }
    }

    /// Raw text
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Overwrite raw text (what typing into the field does)
    #[inline]
    pub fn set_raw(&mut self, raw: impl Into<String>) {
        self.value = raw.into();
    }

    /// Show quantity
    #[inline]
    pub fn set(&mut self, quantity: Quantity) {
        self.value = quantity.to_string();
    }

    /// Current quantity (blank or garbage reads as 1)
    #[inline]
    #[must_use]
    pub fn quantity(&self) -> Quantity {
        Quantity::parse_field(&self.value)
    }
}

/// One rendered cart row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    /// Image source
    pub image: String,
    /// Displayed name
    pub name: String,
    /// Displayed price text
    pub price: String,
    /// Quantity control input
    pub quantity: QuantityField,
}

impl CartRow {
    /// Row for cart item
    #[must_use]
    pub fn from_item(item: &CartItem) -> Self {
        Self {
            image: item.image.clone(),
            name: item.name.clone(),
            price: item.price.clone(),
            quantity: QuantityField::new(item.quantity),
        }
    }

    /// Parsed price times field quantity
    #[must_use]
    pub fn line_total(&self) -> f64 {
        parse_price(Some(&self.price)) * f64::from(self.quantity.quantity().get())
    }
}

/// Cart rows container
///
/// Counts structural changes (rows added, removed, container cleared) so an
/// observer can tell when the row set changed behind the controls' back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartContainer {
    rows: Vec<CartRow>,
    empty_message: Option<String>,
    mutations: u64,
}

impl CartContainer {
    /// Create empty container
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered rows
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[CartRow] {
        &self.rows
    }

    /// Rendered row count
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no rows are rendered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at position
    #[inline]
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&CartRow> {
        self.rows.get(index)
    }

    /// Mutable row at position (field edits are not structural)
    #[inline]
    pub fn row_mut(&mut self, index: usize) -> Option<&mut CartRow> {
        self.rows.get_mut(index)
    }

    /// Empty-state message, when shown
    #[inline]
    #[must_use]
    pub fn empty_message(&self) -> Option<&str> {
        self.empty_message.as_deref()
    }

    /// Structural change counter
    #[inline]
    #[must_use]
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    /// Remove all content
    pub fn clear(&mut self) {
        self.rows.clear();
        self.empty_message = None;
        self.mutations += 1;
    }

    /// Replace content with the empty-state message
    pub fn show_empty(&mut self, message: impl Into<String>) {
        self.rows.clear();
        self.empty_message = Some(message.into());
        self.mutations += 1;
    }

    /// Append row
    pub fn push_row(&mut self, row: CartRow) {
        self.empty_message = None;
        self.rows.push(row);
        self.mutations += 1;
    }

    /// Detach row at position
    pub fn remove_row(&mut self, index: usize) -> Option<CartRow> {
        if index >= self.rows.len() {
            return None;
        }
        self.mutations += 1;
        Some(self.rows.remove(index))
    }
}

/// Subtotal display target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtotalDisplay {
    text: String,
}

impl SubtotalDisplay {
    /// Displayed text
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace displayed text
    #[inline]
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}
