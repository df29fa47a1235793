use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;

/// One product's presence in the cart: the product snapshot taken at
/// add-time plus the chosen quantity. The snapshot is embedded by value so
/// the review screen can render name/price/code without re-fetching, and so
/// later catalog edits do not rewrite a cart in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i32,
}

impl CartLine {
    pub fn subtotal(&self) -> i64 {
        self.product.price * self.quantity as i64
    }
}

/// The shopper's pending order: an ordered sequence of lines, at most one
/// per product id, every quantity >= 1. Order is insertion order; quantity
/// updates never move a line, and a removed product that is added again goes
/// to the end.
///
/// All mutations are total functions: quantities below 1 are clamped to 1
/// and operations on absent product ids are no-ops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

fn clamp_quantity(quantity: i32) -> i32 {
    quantity.max(1)
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a product to the cart. An existing line for the same product id
    /// gets its quantity incremented and keeps its original snapshot and
    /// position; a new product is appended at the end.
    pub fn add(&mut self, product: Product, quantity: i32) {
        let quantity = clamp_quantity(quantity);
        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(CartLine { product, quantity }),
        }
    }

    /// Set the quantity of an existing line, clamped to >= 1. Unknown
    /// product ids are ignored.
    pub fn update_quantity(&mut self, product_id: Uuid, quantity: i32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = clamp_quantity(quantity);
        }
    }

    /// Remove the line for a product id, keeping the relative order of the
    /// remaining lines. Unknown product ids are ignored.
    pub fn remove(&mut self, product_id: Uuid) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity as i64).sum()
    }

    pub fn total_amount(&self) -> i64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Restore a cart from its persisted snapshot. Text that does not parse
    /// as a line sequence yields an empty cart instead of an error.
    pub fn from_snapshot(text: &str) -> Self {
        match serde_json::from_str::<Vec<CartLine>>(text) {
            Ok(lines) => Self { lines },
            Err(err) => {
                tracing::warn!(error = %err, "discarding unparseable cart snapshot");
                Self::default()
            }
        }
    }

    /// Serialize the line sequence for durable storage.
    pub fn to_snapshot(&self) -> String {
        serde_json::to_string(&self.lines).unwrap_or_else(|_| "[]".to_string())
    }
}
