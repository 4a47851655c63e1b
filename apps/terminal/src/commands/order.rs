//! # Order Commands
//!
//! ## Order Lifecycle
//! ```text
//! ┌──────────┐  add <n|name>  ┌──────────┐  export   ┌──────────────┐
//! │  Empty   │───────────────►│ In order │──────────►│ PDF written  │
//! │  order   │                │          │           │ (order kept) │
//! └──────────┘◄───────────────└──────────┘           └──────────────┘
//!                 clear           remove <id>
//! ```

use std::fmt::Write;

use quickbill_core::{MenuItem, OrderTotals};
use tracing::debug;

use crate::cli::join_words;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Finds a live menu item by 1-based row or exact name.
fn lookup<'a>(state: &'a AppState, key: &str) -> AppResult<&'a MenuItem> {
    let menu = state.menu.live();
    let by_row = key.parse::<usize>().ok().and_then(|row| menu.by_position(row));
    by_row
        .or_else(|| menu.by_name(key))
        .ok_or_else(|| AppError::not_found("Menu item", key))
}

/// Adds one unit of a menu item to the order.
pub fn add(state: &mut AppState, words: &[String]) -> AppResult<String> {
    let key = join_words(words);
    let item = lookup(state, &key)?.clone();

    let line = state.order.add_item(&item);
    debug!(id = %line.id, name = %line.name, quantity = line.quantity, "Order line updated");

    let mut out = format!(
        "{} x{} [{}]  {}\n",
        line.name,
        line.quantity,
        line.id,
        line.line_total()
    );
    out.push_str(&totals_line(&OrderTotals::from(&state.order)));
    Ok(out)
}

/// Removes an order line. Unknown ids leave the order unchanged.
pub fn remove(state: &mut AppState, id: &str) -> String {
    match state.order.remove_item(id) {
        Some(line) => {
            let mut out = format!("Removed {} x{}\n", line.name, line.quantity);
            out.push_str(&totals_line(&OrderTotals::from(&state.order)));
            out
        }
        None => format!("No order line with id {}; order unchanged\n", id),
    }
}

pub fn clear(state: &mut AppState) -> String {
    state.order.clear();
    format!("Order cleared\n{}", totals_line(&OrderTotals::from(&state.order)))
}

/// Lists the order lines and totals.
pub fn show(state: &AppState) -> String {
    let order = &state.order;
    if order.is_empty() {
        return "Order is empty\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<11}{:>4}  {:<24}{:>10}", "ID", "QTY", "ITEM", "AMOUNT");
    for line in order.items() {
        let _ = writeln!(
            out,
            "{:<11}{:>4}  {:<24}{:>10}",
            line.id,
            line.quantity,
            line.name,
            line.line_total().to_string()
        );
    }
    out.push_str(&totals_line(&OrderTotals::from(order)));
    out
}

fn totals_line(totals: &OrderTotals) -> String {
    format!(
        "Lines: {}  Qty: {}  Subtotal: {}  Total: {}\n",
        totals.item_count,
        totals.total_quantity,
        totals.subtotal,
        totals.total.format_inr()
    )
}
