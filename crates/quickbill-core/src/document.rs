//! # Stored Documents
//!
//! Keys and JSON encoding for the two documents QuickBill persists.
//!
//! | Key          | Shape                                        |
//! |--------------|----------------------------------------------|
//! | `menu`       | `[{"name": "...", "price": 20}, ...]`        |
//! | `restaurant` | `{"name", "tagline", "address", "gstin"}`    |
//!
//! Documents are overwritten wholesale; there is no schema version.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CoreResult;

/// Storage key of the menu catalog.
pub const MENU_KEY: &str = "menu";

/// Storage key of the restaurant profile.
pub const RESTAURANT_KEY: &str = "restaurant";

/// Outcome of decoding a stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    /// The document parsed into the expected shape.
    Found(T),
    /// Nothing stored under the key.
    Missing,
    /// Stored text is not valid JSON of the expected shape.
    Corrupt(String),
}

impl<T> Decoded<T> {
    /// Returns the decoded value, or `default` for missing and corrupt
    /// documents.
    pub fn unwrap_or_else(self, default: impl FnOnce() -> T) -> T {
        match self {
            Decoded::Found(value) => value,
            Decoded::Missing | Decoded::Corrupt(_) => default(),
        }
    }
}

/// Decodes a raw stored value.
///
/// ## Example
/// ```rust
/// use quickbill_core::document::{decode, Decoded};
/// use quickbill_core::Menu;
///
/// assert_eq!(decode::<Menu>(None), Decoded::Missing);
/// assert!(matches!(decode::<Menu>(Some("not json")), Decoded::Corrupt(_)));
/// ```
pub fn decode<T: DeserializeOwned>(raw: Option<&str>) -> Decoded<T> {
    match raw {
        None => Decoded::Missing,
        Some(text) => match serde_json::from_str(text) {
            Ok(value) => Decoded::Found(value),
            Err(e) => Decoded::Corrupt(e.to_string()),
        },
    }
}

/// Encodes a document for storage.
pub fn encode<T: Serialize>(value: &T) -> CoreResult<String> {
    Ok(serde_json::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{Menu, MenuItem, RestaurantDetails};

    #[test]
    fn test_corrupt_menu_falls_back_to_default() {
        let decoded = decode::<Menu>(Some("{{definitely not json"));
        assert!(matches!(decoded, Decoded::Corrupt(_)));

        let menu = decoded.unwrap_or_else(Menu::default);
        assert_eq!(menu.len(), 6);
        assert_eq!(menu.items()[0].name, "Samosa");
    }

    #[test]
    fn test_wrong_shape_is_corrupt() {
        let decoded = decode::<Menu>(Some(r#"{"name":"Tea"}"#));
        assert!(matches!(decoded, Decoded::Corrupt(_)));

        let decoded = decode::<RestaurantDetails>(Some(r#"{"name":"Only name"}"#));
        assert!(matches!(decoded, Decoded::Corrupt(_)));
    }

    #[test]
    fn test_decode_menu_with_fractional_price() {
        let decoded = decode::<Menu>(Some(r#"[{"name":"Tea","price":12.5}]"#));
        assert_eq!(
            decoded,
            Decoded::Found(Menu::new(vec![MenuItem::new("Tea", Money::from_paise(1250))]))
        );
    }

    #[test]
    fn test_decode_clamps_stored_prices() {
        let decoded = decode::<Menu>(Some(
            r#"[{"name":"Tea","price":-5},{"name":"Thali","price":1e300}]"#,
        ));
        assert_eq!(
            decoded,
            Decoded::Found(Menu::new(vec![
                MenuItem::new("Tea", Money::zero()),
                MenuItem::new("Thali", Money::MAX_PRICE),
            ]))
        );
    }

    #[test]
    fn test_encode_restaurant() {
        let encoded = encode(&RestaurantDetails::default()).unwrap();
        assert_eq!(
            encoded,
            r#"{"name":"THE SNACK BAR","tagline":"Authentic Street Food","address":"102 Main Market, East Wing","gstin":"22AAAAA0000A1Z5"}"#
        );
        assert_eq!(
            decode::<RestaurantDetails>(Some(&encoded)),
            Decoded::Found(RestaurantDetails::default())
        );
    }

    #[test]
    fn test_missing_uses_default() {
        let details = decode::<RestaurantDetails>(None).unwrap_or_else(RestaurantDetails::default);
        assert_eq!(details, RestaurantDetails::default());
    }
}
