//! # Domain Types
//!
//! Core domain types used throughout QuickBill.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    MenuItem     │   │    BillItem     │   │ RestaurantDetails   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  name           │──►│  id (opaque)    │   │  name               │   │
//! │  │  price          │   │  name           │   │  tagline            │   │
//! │  └─────────────────┘   │  price          │   │  address            │   │
//! │          ▲             │  quantity ≥ 1   │   │  gstin              │   │
//! │  ┌───────┴─────────┐   └─────────────────┘   └─────────────────────┘   │
//! │  │  Menu (ordered) │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! - `MenuItem` is identified by its name (unique after a menu save)
//! - `BillItem` carries an opaque id used for removal, but lines merge by name

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Menu Item
// =============================================================================

/// A purchasable item in the menu catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Display name, also the key orders merge on.
    pub name: String,

    /// Unit price.
    pub price: Money,
}

impl MenuItem {
    /// Creates a menu item.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        MenuItem {
            name: name.into(),
            price,
        }
    }

    /// An empty row as appended by "add item" while editing the menu.
    pub fn blank() -> Self {
        MenuItem::new("", Money::zero())
    }
}

/// Seed catalog used when nothing usable is stored.
const DEFAULT_MENU: &[(&str, i64)] = &[
    ("Samosa", 20),
    ("Kachori", 20),
    ("Patties", 30),
    ("Masala Tea", 15),
    ("Coffee", 25),
    ("Bread Pakora", 25),
];

/// Returns the built-in six-item catalog.
pub fn default_menu() -> Vec<MenuItem> {
    DEFAULT_MENU
        .iter()
        .map(|(name, rupees)| MenuItem::new(*name, Money::from_rupees(*rupees)))
        .collect()
}

// =============================================================================
// Menu
// =============================================================================

/// The ordered menu catalog.
///
/// Stored as a bare JSON array of `{name, price}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    /// Creates a menu from items, in display order.
    pub fn new(items: Vec<MenuItem>) -> Self {
        Menu { items }
    }

    /// Returns the items in display order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Mutable access for draft editing (see [`crate::draft`]).
    pub(crate) fn items_mut(&mut self) -> &mut Vec<MenuItem> {
        &mut self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the menu has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by its 1-based position as shown to the operator.
    pub fn by_position(&self, position: usize) -> Option<&MenuItem> {
        position.checked_sub(1).and_then(|i| self.items.get(i))
    }

    /// Looks up an item by exact name.
    pub fn by_name(&self, name: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.name == name)
    }
}

impl Default for Menu {
    fn default() -> Self {
        Menu::new(default_menu())
    }
}

// =============================================================================
// Bill Item
// =============================================================================

/// A line in the running order.
///
/// Name and price are copied from the menu item when the line is created;
/// later menu edits do not change existing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillItem {
    /// Opaque id, unique within the order.
    pub id: String,

    /// Item name at time of adding.
    pub name: String,

    /// Unit price at time of adding.
    pub price: Money,

    /// Quantity, always ≥ 1.
    pub quantity: u32,
}

impl BillItem {
    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Restaurant Details
// =============================================================================

/// The restaurant profile printed at the top of every receipt.
///
/// Fields are free text; nothing is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantDetails {
    pub name: String,
    pub tagline: String,
    pub address: String,
    pub gstin: String,
}

impl Default for RestaurantDetails {
    /// Placeholder business used until the operator saves a profile.
    fn default() -> Self {
        RestaurantDetails {
            name: "THE SNACK BAR".to_string(),
            tagline: "Authentic Street Food".to_string(),
            address: "102 Main Market, East Wing".to_string(),
            gstin: "22AAAAA0000A1Z5".to_string(),
        }
    }
}

impl RestaurantDetails {
    /// Replaces one field.
    pub fn set(&mut self, field: RestaurantField, value: impl Into<String>) {
        let slot = match field {
            RestaurantField::Name => &mut self.name,
            RestaurantField::Tagline => &mut self.tagline,
            RestaurantField::Address => &mut self.address,
            RestaurantField::Gstin => &mut self.gstin,
        };
        *slot = value.into();
    }
}

/// Editable fields of [`RestaurantDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestaurantField {
    Name,
    Tagline,
    Address,
    Gstin,
}

impl RestaurantField {
    const NAMES: [&'static str; 4] = ["name", "tagline", "address", "gstin"];
}

impl FromStr for RestaurantField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Err(ValidationError::Required {
                field: "field".to_string(),
            }),
            "name" | "business" => Ok(RestaurantField::Name),
            "tagline" => Ok(RestaurantField::Tagline),
            "address" => Ok(RestaurantField::Address),
            "gstin" | "gst" => Ok(RestaurantField::Gstin),
            _ => Err(ValidationError::NotAllowed {
                field: "field".to_string(),
                allowed: RestaurantField::NAMES.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

impl fmt::Display for RestaurantField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RestaurantField::Name => "name",
            RestaurantField::Tagline => "tagline",
            RestaurantField::Address => "address",
            RestaurantField::Gstin => "gstin",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_menu_seed() {
        let menu = default_menu();
        assert_eq!(menu.len(), 6);
        assert_eq!(menu[0], MenuItem::new("Samosa", Money::from_rupees(20)));
        assert_eq!(menu[3], MenuItem::new("Masala Tea", Money::from_rupees(15)));
        assert_eq!(menu[5], MenuItem::new("Bread Pakora", Money::from_rupees(25)));
    }

    #[test]
    fn test_menu_lookup() {
        let menu = Menu::default();
        assert_eq!(menu.by_position(1).map(|m| m.name.as_str()), Some("Samosa"));
        assert_eq!(menu.by_position(0), None);
        assert_eq!(menu.by_position(7), None);
        assert_eq!(menu.by_name("Coffee").map(|m| m.price), Some(Money::from_rupees(25)));
        assert_eq!(menu.by_name("coffee"), None);
    }

    #[test]
    fn test_menu_serializes_as_array() {
        let menu = Menu::new(vec![MenuItem::new("Tea", Money::from_rupees(15))]);
        assert_eq!(
            serde_json::to_string(&menu).unwrap(),
            r#"[{"name":"Tea","price":15}]"#
        );
    }

    #[test]
    fn test_line_total() {
        let line = BillItem {
            id: "abc".to_string(),
            name: "Samosa".to_string(),
            price: Money::from_rupees(20),
            quantity: 2,
        };
        assert_eq!(line.line_total(), Money::from_rupees(40));
    }

    #[test]
    fn test_restaurant_field_parsing() {
        assert_eq!("gstin".parse::<RestaurantField>().unwrap(), RestaurantField::Gstin);
        assert_eq!("Tagline".parse::<RestaurantField>().unwrap(), RestaurantField::Tagline);
        assert!(matches!(
            "phone".parse::<RestaurantField>(),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert!(matches!(
            " ".parse::<RestaurantField>(),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_restaurant_set_field() {
        let mut details = RestaurantDetails::default();
        details.set(RestaurantField::Address, "7 Station Road");
        assert_eq!(details.address, "7 Station Road");
        assert_eq!(details.name, "THE SNACK BAR");
    }
}
