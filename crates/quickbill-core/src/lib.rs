//! # quickbill-core: Pure Billing Logic for QuickBill
//!
//! This crate is the **heart** of QuickBill. It contains the billing math,
//! menu/restaurant editing rules and receipt layout as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QuickBill Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Operator Console (apps/terminal)              │   │
//! │  │    menu ──► add ──► order ──► receipt ──► export                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ quickbill-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  types   │ │  money   │ │  order   │ │ draft / document │  │   │
//! │  │   │ MenuItem │ │  Money   │ │  Order   │ │  Editable<T>     │  │   │
//! │  │   │ BillItem │ │ (paise)  │ │  Totals  │ │  decode/encode   │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO FILES • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              quickbill-db (Document Store)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, BillItem, RestaurantDetails)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`order`] - The running bill and its totals
//! - [`draft`] - Edit-then-commit-or-cancel for the menu and profile
//! - [`document`] - Stored document keys and JSON decoding
//! - [`receipt`] - Receipt view and text layout
//! - [`clock`] - Date/time readings shown on screen and receipt
//! - [`validation`] - Input coercion rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use quickbill_core::{default_menu, Order};
//!
//! let menu = default_menu();
//! let mut order = Order::new();
//!
//! order.add_item(&menu[0]); // Samosa
//! order.add_item(&menu[0]); // Samosa again: quantity 2
//! order.add_item(&menu[4]); // Coffee
//!
//! assert_eq!(order.item_count(), 2);
//! assert_eq!(order.total().to_string(), "65.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod document;
pub mod draft;
pub mod error;
pub mod money;
pub mod order;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use clock::ClockReading;
pub use draft::{Draft, Editable};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{Order, OrderTotals};
pub use receipt::{Presentation, ReceiptMeta, ReceiptView};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Bill number printed on every receipt and used in the export file name.
///
/// Numbering is not unique across sessions; every bill carries the same
/// document identifier.
pub const DEFAULT_BILL_NUMBER: &str = "1024";

/// Terminal identifier printed on the receipt.
pub const DEFAULT_TERMINAL_ID: &str = "TERM-01";
