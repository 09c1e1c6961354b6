//! Cart View
//!
//! Render/sync loop for the cart page. There is one steady state, rendered
//! rows == persisted cart, and every control handler returns to it before
//! yielding:
//!
//! - render: rows rebuilt from the in-memory cart, then a subtotal pass
//! - quantity controls: field clamped to >= 1, then a subtotal pass
//! - remove: line dropped and persisted, then a full re-render
//! - subtotal pass: totals the rendered rows and writes their quantities back
//!   into the cart by position, then persists
//!
//! Rows map to cart lines strictly by position.

use crate::config::WidgetConfig;
use crate::error::WidgetError;
use crate::page::{CartContainer, CartRow, QuantityField, SubtotalDisplay};
use cart_core::{Cart, CartItem, PriceFormat, Quantity};
use cart_store::{CartRepository, KeyValueStore};

/// Cart page controller
#[derive(Debug)]
pub struct CartView<S> {
    repo: CartRepository<S>,
    cart: Cart,
    container: CartContainer,
    subtotal: SubtotalDisplay,
    format: PriceFormat,
    empty_message: String,
    observed_mutations: u64,
}

impl<S: KeyValueStore> CartView<S> {
    /// Load the stored cart and render it
    ///
    /// # Errors
    /// Storage failure.
    pub fn activate(repo: CartRepository<S>, config: &WidgetConfig) -> Result<Self, WidgetError> {
        let cart = repo.load()?;
        let mut view = Self {
            repo,
            cart,
            container: CartContainer::new(),
            subtotal: SubtotalDisplay::default(),
            format: config.currency.clone(),
            empty_message: config.empty_message.clone(),
            observed_mutations: 0,
        };
        view.render()?;
        Ok(view)
    }

    /// In-memory cart
    #[inline]
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Rendered container
    #[inline]
    #[must_use]
    pub fn container(&self) -> &CartContainer {
        &self.container
    }

    /// Container for mutation outside the controls
    ///
    /// Structural changes made through this handle are picked up by
    /// [`CartView::settle`].
    #[inline]
    pub fn container_mut(&mut self) -> &mut CartContainer {
        &mut self.container
    }

    /// Displayed subtotal text
    #[inline]
    #[must_use]
    pub fn subtotal_text(&self) -> &str {
        self.subtotal.text()
    }

    /// Rebuild every row from the cart
    ///
    /// # Errors
    /// Storage failure during the subtotal pass.
    pub fn render(&mut self) -> Result<(), WidgetError> {
        self.container.clear();

        if self.cart.is_empty() {
            self.container.show_empty(self.empty_message.clone());
            self.subtotal.set(self.format.format(0.0));
            self.observed_mutations = self.container.mutation_count();
            tracing::debug!("rendered empty cart");
            return Ok(());
        }

        for item in self.cart.iter() {
            self.container.push_row(CartRow::from_item(item));
        }
        tracing::debug!(rows = self.container.len(), "rendered cart");

        self.recompute_subtotal()?;
        Ok(())
    }

    /// Decrement control
    ///
    /// # Errors
    /// Row not rendered, or storage failure.
    pub fn decrement(&mut self, row: usize) -> Result<Quantity, WidgetError> {
        self.update_field(row, Quantity::decrement)
    }

    /// Increment control
    ///
    /// # Errors
    /// Row not rendered, or storage failure.
    pub fn increment(&mut self, row: usize) -> Result<Quantity, WidgetError> {
        self.update_field(row, Quantity::increment)
    }

    /// Live typing into the quantity field
    ///
    /// The text is floored and clamped to >= 1, and the field shows the
    /// clamped value.
    ///
    /// # Errors
    /// Row not rendered, or storage failure.
    pub fn input(&mut self, row: usize, raw: &str) -> Result<Quantity, WidgetError> {
        let quantity = Quantity::parse_field(raw);
        self.field_mut(row)?.set(quantity);
        self.recompute_subtotal()?;
        Ok(quantity)
    }

    /// Commit of the quantity field (blur / enter)
    ///
    /// # Errors
    /// Row not rendered, or storage failure.
    pub fn change(&mut self, row: usize) -> Result<Quantity, WidgetError> {
        self.update_field(row, |q| q)
    }

    /// Remove control: drop the line, persist, re-render
    ///
    /// # Errors
    /// Row not rendered, or storage failure.
    pub fn remove(&mut self, row: usize) -> Result<CartItem, WidgetError> {
        self.check_row(row)?;
        let removed = self.cart.remove(row)?;
        self.repo.save(&self.cart)?;
        tracing::info!(row, name = %removed.name, "cart line removed");
        self.render()?;
        Ok(removed)
    }

    /// Total the rendered rows, sync their quantities into the cart, persist
    ///
    /// Rows with no cart line at their position (added outside the controls)
    /// count toward the subtotal but are not written back.
    ///
    /// # Errors
    /// Storage failure.
    pub fn recompute_subtotal(&mut self) -> Result<f64, WidgetError> {
        let mut total = 0.0;
        for (index, row) in self.container.rows().iter().enumerate() {
            let quantity = row.quantity.quantity();
            total += row.line_total();
            if self.cart.set_quantity(index, quantity).is_err() {
                tracing::debug!(index, "rendered row has no cart line");
            }
        }

        self.repo.save(&self.cart)?;
        self.subtotal.set(self.format.format(total));
        self.observed_mutations = self.container.mutation_count();
        tracing::debug!(total, text = self.subtotal.text(), "subtotal recomputed");
        Ok(total)
    }

    /// Structural observer hook
    ///
    /// Host calls this after DOM mutations settle. Recomputes only when the
    /// row set changed since the last subtotal pass; returns whether it did.
    ///
    /// # Errors
    /// Storage failure.
    pub fn settle(&mut self) -> Result<bool, WidgetError> {
        if self.container.mutation_count() == self.observed_mutations {
            return Ok(false);
        }
        tracing::debug!("container changed outside the controls");
        self.recompute_subtotal()?;
        Ok(true)
    }

    fn update_field<F>(&mut self, row: usize, step: F) -> Result<Quantity, WidgetError>
    where
        F: FnOnce(Quantity) -> Quantity,
    {
        let field = self.field_mut(row)?;
        let quantity = step(field.quantity());
        field.set(quantity);
        self.recompute_subtotal()?;
        Ok(quantity)
    }

    fn field_mut(&mut self, row: usize) -> Result<&mut QuantityField, WidgetError> {
        let rows = self.container.len();
        self.container
            .row_mut(row)
            .map(|r| &mut r.quantity)
            .ok_or(WidgetError::RowOutOfRange { row, rows })
    }

    fn check_row(&self, row: usize) -> Result<(), WidgetError> {
        let rows = self.container.len();
        if row < rows {
            Ok(())
        } else {
            Err(WidgetError::RowOutOfRange { row, rows })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_store::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn seeded(items: Vec<CartItem>) -> (Arc<MemoryStore>, CartView<Arc<MemoryStore>>) {
        let store = Arc::new(MemoryStore::new());
        let repo = CartRepository::new(Arc::clone(&store));
        repo.save(&Cart::from_items(items)).unwrap();
        let view = CartView::activate(repo, &WidgetConfig::default()).unwrap();
        (store, view)
    }

    fn stored(store: &Arc<MemoryStore>) -> Cart {
        CartRepository::new(Arc::clone(store)).load().unwrap()
    }

    fn shoe() -> CartItem {
        CartItem::new(Some("1".into()), "Shoe", "₦5,000", "/s.jpg").with_quantity(2)
    }

    fn sock() -> CartItem {
        CartItem::new(None, "Sock", "₦500", "/k.jpg")
    }

    #[test]
    fn empty_cart_renders_message() {
        let (_, view) = seeded(vec![]);
        assert!(view.container().is_empty());
        assert_eq!(view.container().empty_message(), Some("Your cart is empty."));
        assert_eq!(view.subtotal_text(), "₦0");
    }

    #[test]
    fn renders_rows_in_order() {
        let (_, view) = seeded(vec![shoe(), sock()]);
        let rows = view.container().rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Shoe");
        assert_eq!(rows[0].quantity.value(), "2");
        assert_eq!(rows[1].name, "Sock");
        assert_eq!(view.subtotal_text(), "₦10,500");
    }

    #[test]
    fn decrement_floors_at_one() {
        let (store, mut view) = seeded(vec![shoe()]);
        assert_eq!(view.decrement(0).unwrap().get(), 1);
        assert_eq!(view.decrement(0).unwrap().get(), 1);
        assert_eq!(view.container().rows()[0].quantity.value(), "1");
        assert_eq!(stored(&store).get(0).unwrap().quantity.get(), 1);
        assert_eq!(view.subtotal_text(), "₦5,000");
    }

    #[test]
    fn increment_persists() {
        let (store, mut view) = seeded(vec![sock()]);
        view.increment(0).unwrap();
        view.increment(0).unwrap();
        assert_eq!(stored(&store).get(0).unwrap().quantity.get(), 3);
        assert_eq!(view.subtotal_text(), "₦1,500");
    }

    #[test]
    fn input_clamps_and_floors() {
        let (store, mut view) = seeded(vec![sock()]);
        assert_eq!(view.input(0, "4.7").unwrap().get(), 4);
        assert_eq!(view.container().rows()[0].quantity.value(), "4");
        assert_eq!(view.input(0, "-2").unwrap().get(), 1);
        assert_eq!(view.input(0, "").unwrap().get(), 1);
        assert_eq!(view.input(0, "lots").unwrap().get(), 1);
        assert_eq!(stored(&store).get(0).unwrap().quantity.get(), 1);
    }

    #[test]
    fn change_commits_raw_field() {
        let (store, mut view) = seeded(vec![sock()]);
        view.container_mut().row_mut(0).unwrap().quantity.set_raw("6");
        assert_eq!(view.change(0).unwrap().get(), 6);
        assert_eq!(stored(&store).get(0).unwrap().quantity.get(), 6);
        assert_eq!(view.subtotal_text(), "₦3,000");
    }

    #[test]
    fn change_floors_fractional_field() {
        let (store, mut view) = seeded(vec![sock()]);
        view.container_mut().row_mut(0).unwrap().quantity.set_raw("2.5");
        assert_eq!(view.change(0).unwrap().get(), 2);
        assert_eq!(view.container().rows()[0].quantity.value(), "2");
        assert_eq!(stored(&store).get(0).unwrap().quantity.get(), 2);
        assert_eq!(view.subtotal_text(), "₦1,000");
    }

    #[test]
    fn remove_rerenders_and_shifts() {
        let hat = CartItem::new(None, "Hat", "₦2,000", "/h.jpg");
        let (store, mut view) = seeded(vec![shoe(), sock(), hat.clone()]);

        let removed = view.remove(0).unwrap();
        assert_eq!(removed.name, "Shoe");

        let names: Vec<&str> = view.container().rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Sock", "Hat"]);
        assert_eq!(stored(&store).items(), &[sock(), hat][..]);
        assert_eq!(view.subtotal_text(), "₦2,500");

        // old row 2 is now row 1
        view.increment(1).unwrap();
        assert_eq!(stored(&store).get(1).unwrap().quantity.get(), 2);
    }

    #[test]
    fn removing_last_row_shows_empty_state() {
        let (store, mut view) = seeded(vec![sock()]);
        view.remove(0).unwrap();
        assert_eq!(view.container().empty_message(), Some("Your cart is empty."));
        assert_eq!(view.subtotal_text(), "₦0");
        assert!(stored(&store).is_empty());
    }

    #[test]
    fn controls_on_missing_row_fail_cleanly() {
        let (store, mut view) = seeded(vec![sock()]);
        assert!(matches!(
            view.increment(3),
            Err(WidgetError::RowOutOfRange { row: 3, rows: 1 })
        ));
        assert!(matches!(view.remove(1), Err(WidgetError::RowOutOfRange { .. })));
        assert_eq!(stored(&store).len(), 1);
    }

    #[test]
    fn settle_picks_up_external_rows() {
        let (store, mut view) = seeded(vec![sock()]);
        assert!(!view.settle().unwrap());

        let extra = CartItem::new(None, "Gift", "₦1,000", "/g.jpg").with_quantity(2);
        view.container_mut().push_row(CartRow::from_item(&extra));
        assert!(view.settle().unwrap());
        assert_eq!(view.subtotal_text(), "₦2,500");
        assert!(!view.settle().unwrap());

        // external row is not tracked as a cart line
        assert_eq!(stored(&store).len(), 1);
    }

    #[test]
    fn field_edits_alone_do_not_trigger_settle() {
        let (_, mut view) = seeded(vec![sock()]);
        view.container_mut().row_mut(0).unwrap().quantity.set_raw("9");
        assert!(!view.settle().unwrap());
        assert_eq!(view.subtotal_text(), "₦500");
    }

    #[test]
    fn activation_normalizes_stored_quantities() {
        let store = Arc::new(MemoryStore::with_value(
            "cart",
            r#"[{"id":null,"name":"Sock","price":"₦500","image":"/k.jpg","quantity":0}]"#,
        ));
        let view =
            CartView::activate(CartRepository::new(Arc::clone(&store)), &WidgetConfig::default())
                .unwrap();
        assert_eq!(view.container().rows()[0].quantity.value(), "1");
        assert_eq!(stored(&store).get(0).unwrap().quantity.get(), 1);
    }

    #[test]
    fn activation_keeps_entries_with_null_fields() {
        let store = Arc::new(MemoryStore::with_value(
            "cart",
            r#"[{"id":null,"name":"Shoe","price":"₦5,000","image":null,"quantity":2},{"id":"1","name":"Sock","price":"₦500","image":"/k.jpg","quantity":1}]"#,
        ));
        let view =
            CartView::activate(CartRepository::new(Arc::clone(&store)), &WidgetConfig::default())
                .unwrap();
        assert_eq!(view.container().len(), 2);
        assert_eq!(view.container().rows()[0].image, "");
        assert_eq!(view.subtotal_text(), "₦10,500");
        assert_eq!(stored(&store).len(), 2);
    }
}
