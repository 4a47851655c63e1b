//! # Order
//!
//! The running bill: an in-memory list of [`BillItem`]s that is never
//! persisted.
//!
//! ## Order Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Operations                                     │
//! │                                                                         │
//! │  Operator Action          Operation               Order Change          │
//! │  ───────────────          ─────────               ────────────          │
//! │                                                                         │
//! │  Pick menu item ─────────► add_item() ──────────► new line (qty 1)      │
//! │                                                 or same name: qty + 1   │
//! │                                                                         │
//! │  Remove line ────────────► remove_item(id) ─────► line dropped          │
//! │                                                  (no-op if absent)      │
//! │                                                                         │
//! │  Clear all ──────────────► clear() ─────────────► items.clear()         │
//! │                                                                         │
//! │  View totals ────────────► OrderTotals::from() ─► (read only)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totals
//! `subtotal = Σ price × quantity` and `total = subtotal`. There is no tax
//! line.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::types::{BillItem, MenuItem};

/// Length of generated line ids.
const LINE_ID_LEN: usize = 9;

/// The running order.
///
/// ## Invariants
/// - At most one line per distinct name (re-adding increases quantity)
/// - Every quantity is ≥ 1
/// - Line ids are unique within the order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    items: Vec<BillItem>,
}

impl Order {
    /// Creates a new empty order.
    pub fn new() -> Self {
        Order { items: Vec::new() }
    }

    /// Returns the lines in the order they were first added.
    pub fn items(&self) -> &[BillItem] {
        &self.items
    }

    /// Adds a menu item to the order or increases its quantity.
    ///
    /// ## Behavior
    /// - Line with the same name exists: quantity + 1, price unchanged
    /// - Otherwise: new line with a fresh id and quantity 1
    ///
    /// Returns the affected line.
    pub fn add_item(&mut self, menu_item: &MenuItem) -> &BillItem {
        if let Some(pos) = self.items.iter().position(|i| i.name == menu_item.name) {
            let line = &mut self.items[pos];
            line.quantity = line.quantity.saturating_add(1);
            return line;
        }

        let id = self.fresh_line_id();
        self.items.push(BillItem {
            id,
            name: menu_item.name.clone(),
            price: menu_item.price,
            quantity: 1,
        });
        &self.items[self.items.len() - 1]
    }

    /// Removes the line with the given id.
    ///
    /// Returns the removed line, or `None` when no line matched (the order
    /// is left unchanged).
    pub fn remove_item(&mut self, id: &str) -> Option<BillItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(pos))
    }

    /// Clears all lines from the order.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Calculates the subtotal.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(BillItem::line_total).sum()
    }

    /// Calculates the grand total (equal to the subtotal).
    pub fn total(&self) -> Money {
        self.subtotal()
    }

    /// Checks if the order is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Generates a short opaque id not used by any current line.
    fn fresh_line_id(&self) -> String {
        loop {
            let mut id = Uuid::new_v4().simple().to_string();
            id.truncate(LINE_ID_LEN);
            if !self.items.iter().any(|i| i.id == id) {
                return id;
            }
        }
    }
}

/// Order totals summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub item_count: usize,
    pub total_quantity: u64,
    pub subtotal: Money,
    pub total: Money,
}

impl From<&Order> for OrderTotals {
    fn from(order: &Order) -> Self {
        OrderTotals {
            item_count: order.item_count(),
            total_quantity: order.total_quantity(),
            subtotal: order.subtotal(),
            total: order.total(),
        }
    }
}
