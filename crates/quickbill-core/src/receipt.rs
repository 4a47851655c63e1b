//! # Receipt
//!
//! Builds the receipt view from the order, the restaurant profile and a
//! clock reading, and lays it out as fixed-width text.
//!
//! ## Layout (width 42, export presentation)
//! ```text
//!               THE SNACK BAR
//!           Authentic Street Food
//!         102 Main Market, East Wing
//!           GSTIN: 22AAAAA0000A1Z5
//! ------------------------------------------
//! DATE: 19 Oct 2026              TIME: 09:05
//! BILL NO: #1024                POS: TERM-01
//! ------------------------------------------
//! QTY DESCRIPTION                      PRICE
//! ------------------------------------------
//! 2   SAMOSA                           40.00
//! 1   COFFEE                           25.00
//! ------------------------------------------
//! SUBTOTAL                             65.00
//! TOTAL                            INR 65.00
//! ------------------------------------------
//!                 THANK YOU
//!         Generated by QuickBill POS
//! ```
//!
//! The preview presentation frames the same lines in a box with a drop
//! shadow, shows the total with the rupee sign, and prints
//! `Ready for order...` in place of an empty table.

use serde::{Deserialize, Serialize};

use crate::clock::ClockReading;
use crate::money::Money;
use crate::order::Order;
use crate::types::RestaurantDetails;
use crate::{DEFAULT_BILL_NUMBER, DEFAULT_TERMINAL_ID};

/// Narrowest layout that still fits the table columns.
pub const MIN_WIDTH: usize = 32;

/// Default characters per line.
pub const DEFAULT_WIDTH: usize = 42;

const QTY_COL: usize = 4;
const PRICE_COL: usize = 10;
const EMPTY_PLACEHOLDER: &str = "Ready for order...";

/// How the receipt is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// On-screen preview: boxed with a shadow, placeholder for empty orders.
    Preview,
    /// Export: flat, no placeholder, ASCII currency label.
    Export,
}

/// Identifiers printed in the receipt header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptMeta {
    pub bill_number: String,
    pub terminal_id: String,
}

impl Default for ReceiptMeta {
    fn default() -> Self {
        ReceiptMeta {
            bill_number: DEFAULT_BILL_NUMBER.to_string(),
            terminal_id: DEFAULT_TERMINAL_ID.to_string(),
        }
    }
}

/// One row of the item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub quantity: u32,
    /// Upper-cased item name.
    pub description: String,
    /// Line total.
    pub amount: Money,
}

/// Everything printed on a receipt, detached from the live state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptView {
    pub restaurant: RestaurantDetails,
    pub reading: ClockReading,
    pub meta: ReceiptMeta,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub total: Money,
}

impl ReceiptView {
    /// Snapshots the order and profile into a view.
    pub fn build(
        order: &Order,
        restaurant: &RestaurantDetails,
        reading: &ClockReading,
        meta: &ReceiptMeta,
    ) -> Self {
        let lines = order
            .items()
            .iter()
            .map(|item| ReceiptLine {
                quantity: item.quantity,
                description: item.name.to_uppercase(),
                amount: item.line_total(),
            })
            .collect();

        ReceiptView {
            restaurant: restaurant.clone(),
            reading: reading.clone(),
            meta: meta.clone(),
            lines,
            subtotal: order.subtotal(),
            total: order.total(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lays the receipt out as text, `width` characters per content line.
    ///
    /// Widths below [`MIN_WIDTH`] are raised to it.
    pub fn render_text(&self, width: usize, presentation: Presentation) -> String {
        let width = width.max(MIN_WIDTH);
        let mut b = ReceiptTextBuilder::new(width);

        b.center(&self.restaurant.name);
        b.center(&self.restaurant.tagline);
        b.center(&self.restaurant.address);
        b.center(&format!("GSTIN: {}", self.restaurant.gstin));
        b.dash_sep();

        b.line_lr(
            &format!("DATE: {}", self.reading.date),
            &format!("TIME: {}", self.reading.time),
        );
        b.line_lr(
            &format!("BILL NO: #{}", self.meta.bill_number),
            &format!("POS: {}", self.meta.terminal_id),
        );
        b.dash_sep();

        let desc_col = width - QTY_COL - PRICE_COL;
        b.write_line(&format!(
            "{:<qty$}{:<desc$}{:>price$}",
            "QTY",
            "DESCRIPTION",
            "PRICE",
            qty = QTY_COL,
            desc = desc_col,
            price = PRICE_COL
        ));
        b.dash_sep();

        if self.lines.is_empty() {
            if presentation == Presentation::Preview {
                b.center(EMPTY_PLACEHOLDER);
            }
        } else {
            for line in &self.lines {
                // Descriptions wider than the column continue on the next row.
                let chunks = wrap_chars(&line.description, desc_col - 1);
                for (i, chunk) in chunks.iter().enumerate() {
                    let (qty, price) = if i == 0 {
                        (line.quantity.to_string(), line.amount.to_string())
                    } else {
                        (String::new(), String::new())
                    };
                    b.write_line(&format!(
                        "{:<qty_w$}{:<desc_w$}{:>price_w$}",
                        qty,
                        chunk,
                        price,
                        qty_w = QTY_COL,
                        desc_w = desc_col,
                        price_w = PRICE_COL
                    ));
                }
            }
        }
        b.dash_sep();

        b.line_lr("SUBTOTAL", &self.subtotal.to_string());
        let total = match presentation {
            Presentation::Preview => self.total.format_inr(),
            Presentation::Export => format!("INR {}", self.total.format_grouped()),
        };
        b.line_lr("TOTAL", &total);
        b.dash_sep();

        b.center("THANK YOU");
        b.center("Generated by QuickBill POS");

        match presentation {
            Presentation::Preview => b.finalize_framed(),
            Presentation::Export => b.finalize(),
        }
    }
}

/// Name of the exported PDF: `Bill_<bill>_<name>.pdf`.
///
/// Every run of whitespace in the restaurant name becomes one `_`. Path
/// separators, characters reserved in file names (`: * ? " < > |`) and
/// control characters become `_` in both parts, so the result is always a
/// single path component.
///
/// ## Example
/// ```rust
/// use quickbill_core::receipt::export_file_name;
///
/// assert_eq!(
///     export_file_name("THE SNACK BAR", "1024"),
///     "Bill_1024_THE_SNACK_BAR.pdf"
/// );
/// ```
pub fn export_file_name(restaurant_name: &str, bill_number: &str) -> String {
    let mut name = String::with_capacity(restaurant_name.len());
    let mut in_space = false;
    for c in restaurant_name.chars() {
        if c.is_whitespace() {
            if !in_space {
                name.push('_');
            }
            in_space = true;
        } else {
            name.push(file_name_char(c));
            in_space = false;
        }
    }
    let bill: String = bill_number.chars().map(file_name_char).collect();
    format!("Bill_{}_{}.pdf", bill, name)
}

fn file_name_char(c: char) -> char {
    match c {
        '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
        c if c.is_control() => '_',
        c => c,
    }
}

/// Splits text into pieces of at most `width` characters.
fn wrap_chars(s: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

// =============================================================================
// Text Builder
// =============================================================================

/// Fixed-width line builder. Widths are counted in characters.
struct ReceiptTextBuilder {
    lines: Vec<String>,
    width: usize,
}

impl ReceiptTextBuilder {
    fn new(width: usize) -> Self {
        ReceiptTextBuilder {
            lines: Vec::new(),
            width,
        }
    }

    fn write_line(&mut self, s: &str) {
        self.lines.push(s.trim_end().to_string());
    }

    fn dash_sep(&mut self) {
        self.lines.push("-".repeat(self.width));
    }

    /// Centers text, wrapping it when wider than the line.
    fn center(&mut self, s: &str) {
        for chunk in wrap_chars(s.trim(), self.width) {
            let pad = (self.width - chunk.chars().count()) / 2;
            self.write_line(&format!("{}{}", " ".repeat(pad), chunk));
        }
    }

    /// Left-aligned key, right-aligned value.
    fn line_lr(&mut self, left: &str, right: &str) {
        let lw = left.chars().count();
        let rw = right.chars().count();
        if lw + rw >= self.width {
            self.write_line(&format!("{} {}", left, right));
        } else {
            let spaces = self.width - lw - rw;
            self.write_line(&format!("{}{}{}", left, " ".repeat(spaces), right));
        }
    }

    fn finalize(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    /// Draws the lines inside a box with a drop shadow on the right and
    /// bottom.
    fn finalize_framed(self) -> String {
        let inner = self
            .lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.width);
        let bar = "─".repeat(inner + 2);

        let mut out = String::new();
        out.push_str(&format!("┌{}┐\n", bar));
        for line in &self.lines {
            out.push_str(&format!("│ {:<inner$} │░\n", line, inner = inner));
        }
        out.push_str(&format!("└{}┘░\n", bar));
        out.push_str(&format!(" {}\n", "░".repeat(inner + 4)));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{default_menu, MenuItem};

    fn reading() -> ClockReading {
        ClockReading {
            date: "19 Oct 2026".to_string(),
            time: "09:05".to_string(),
        }
    }

    fn sample_order() -> Order {
        let menu = default_menu();
        let mut order = Order::new();
        order.add_item(&menu[0]);
        order.add_item(&menu[0]);
        order.add_item(&menu[4]);
        order
    }

    fn view(order: &Order) -> ReceiptView {
        ReceiptView::build(
            order,
            &RestaurantDetails::default(),
            &reading(),
            &ReceiptMeta::default(),
        )
    }

    #[test]
    fn test_build_snapshots_order() {
        let view = view(&sample_order());

        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.lines[0].description, "SAMOSA");
        assert_eq!(view.lines[0].quantity, 2);
        assert_eq!(view.lines[0].amount, Money::from_rupees(40));
        assert_eq!(view.subtotal, Money::from_rupees(65));
        assert_eq!(view.total, view.subtotal);
    }

    #[test]
    fn test_export_layout() {
        let text = view(&sample_order()).render_text(DEFAULT_WIDTH, Presentation::Export);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].trim(), "THE SNACK BAR");
        assert_eq!(lines[3].trim(), "GSTIN: 22AAAAA0000A1Z5");
        assert_eq!(lines[5], "DATE: 19 Oct 2026              TIME: 09:05");
        assert_eq!(lines[6], "BILL NO: #1024                POS: TERM-01");
        assert_eq!(lines[8], "QTY DESCRIPTION                      PRICE");
        assert_eq!(lines[10], "2   SAMOSA                           40.00");
        assert_eq!(lines[11], "1   COFFEE                           25.00");
        assert_eq!(lines[13], "SUBTOTAL                             65.00");
        assert_eq!(lines[14], "TOTAL                            INR 65.00");
        assert_eq!(lines[16].trim(), "THANK YOU");
        assert_eq!(lines[17].trim(), "Generated by QuickBill POS");
        assert!(lines.iter().all(|l| l.chars().count() <= DEFAULT_WIDTH));
    }

    #[test]
    fn test_preview_is_framed_with_rupee_total() {
        let text = view(&sample_order()).render_text(DEFAULT_WIDTH, Presentation::Preview);

        assert!(text.starts_with('┌'));
        assert!(text.contains("₹65.00"));
        assert!(text.contains('░'));
        assert!(!text.contains("INR"));
    }

    #[test]
    fn test_placeholder_only_in_preview() {
        let empty = view(&Order::new());

        let preview = empty.render_text(DEFAULT_WIDTH, Presentation::Preview);
        let export = empty.render_text(DEFAULT_WIDTH, Presentation::Export);

        assert!(preview.contains("Ready for order..."));
        assert!(!export.contains("Ready for order..."));
        assert!(!export.contains('░'));
    }

    #[test]
    fn test_total_uses_indian_grouping() {
        let mut order = Order::new();
        let feast = MenuItem::new("Feast", Money::from_rupees(61_728));
        order.add_item(&feast);
        order.add_item(&feast);

        let v = view(&order);
        assert!(v
            .render_text(DEFAULT_WIDTH, Presentation::Preview)
            .contains("₹1,23,456.00"));
        assert!(v
            .render_text(DEFAULT_WIDTH, Presentation::Export)
            .contains("INR 1,23,456.00"));
    }

    #[test]
    fn test_long_description_wraps_in_narrow_layout() {
        let mut order = Order::new();
        order.add_item(&MenuItem::new(
            "Special Paneer Tikka Roll With Extra Cheese",
            Money::from_rupees(120),
        ));

        let text = view(&order).render_text(10, Presentation::Export);

        assert!(text.lines().all(|l| l.chars().count() <= MIN_WIDTH));
        assert!(text.contains("120.00"));
        assert!(text.contains("SPECIAL PAN"));
    }

    #[test]
    fn test_export_file_name_collapses_whitespace_runs() {
        assert_eq!(
            export_file_name("Chai  Point\tExpress", "1024"),
            "Bill_1024_Chai_Point_Express.pdf"
        );
        assert_eq!(export_file_name("Solo", "7"), "Bill_7_Solo.pdf");
    }

    #[test]
    fn test_export_file_name_stays_one_path_component() {
        let name = export_file_name("../../etc/Chai/Point", "1024");
        assert_eq!(name, "Bill_1024_.._.._etc_Chai_Point.pdf");
        assert_eq!(
            std::path::Path::new("/srv/bills").join(&name).parent(),
            Some(std::path::Path::new("/srv/bills"))
        );

        assert_eq!(
            export_file_name("A\\B:C*D?\"E<F>G|H\u{7}", "10/24"),
            "Bill_10_24_A_B_C_D__E_F_G_H_.pdf"
        );
    }
}
