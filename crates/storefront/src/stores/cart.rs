//! Shopping cart store.
//!
//! An insertion-ordered collection of line items, held entirely in memory
//! for the lifetime of the UI session. Never persisted: closing the session
//! empties the cart, exactly like a full page reload in the original.
//!
//! Every operation is a total function over the current state - unknown
//! product IDs are no-ops, never errors.

use serde::Serialize;

use shophub_core::{Price, ProductId};

use crate::catalog::Product;

/// One product entry in the cart.
///
/// Title, price, and image are snapshotted from the product at add time;
/// later catalog changes do not retroactively update existing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    /// Product ID (unique within the cart).
    pub id: ProductId,
    /// Product title at add time.
    pub title: String,
    /// Unit price at add time.
    pub price: Price,
    /// Product image URL at add time.
    pub image: String,
    /// Number of units; always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// The extended price for this line (`price × quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.line_total(self.quantity)
    }
}

/// The shopping cart.
///
/// Lines are kept in insertion order and are unique by product ID.
/// Invariant: no line ever has quantity 0 - a line decremented to zero is
/// removed instead.
#[derive(Debug, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product` to the cart.
    ///
    /// If the product is already in the cart its quantity goes up by one
    /// (no upper bound); otherwise a new line is appended with quantity 1,
    /// snapshotting the product's title, price, and image.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return;
        }
        self.lines.push(CartLine {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        });
    }

    /// Remove the line for `id` entirely, whatever its quantity.
    pub fn remove(&mut self, id: ProductId) {
        self.lines.retain(|line| line.id != id);
    }

    /// Increment the quantity of the line for `id` by one.
    pub fn increase_quantity(&mut self, id: ProductId) {
        if let Some(line) = self.line_mut(id) {
            line.quantity = line.quantity.saturating_add(1);
        }
    }

    /// Decrement the quantity of the line for `id` by one.
    ///
    /// Decrementing a quantity-1 line removes it; quantities are never
    /// clamped at 1 and never reach 0.
    pub fn decrease_quantity(&mut self, id: ProductId) {
        if let Some(line) = self.line_mut(id) {
            line.quantity -= 1;
        }
        self.lines.retain(|line| line.quantity > 0);
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `price × quantity` over all lines.
    ///
    /// No rounding is applied; formatting is a presentation concern.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }
}
