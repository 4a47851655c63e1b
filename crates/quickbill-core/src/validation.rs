//! # Validation Module
//!
//! Input rules for the menu editor.
//!
//! There is very little validation in QuickBill:
//! prices are coerced rather than rejected, blank menu rows are dropped on
//! save, and restaurant fields are free text.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operator types           coerce_price()         Draft row price        │
//! │  ─────────────            ──────────────         ───────────────        │
//! │  "25"            ───────► 25             ──────► ₹25.00                 │
//! │  "12.5 rs"       ───────► 12.5           ──────► ₹12.50                 │
//! │  "abc"           ───────► 0              ──────► ₹0.00                  │
//! │  "-5"            ───────► 0 (clamped)    ──────► ₹0.00                  │
//! │  "1e300"         ───────► MAX_PRICE      ──────► ₹1,00,00,000.00        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;

/// Coerces free-text price input into a non-negative amount.
///
/// ## Rules
/// - Leading whitespace is ignored
/// - The longest leading decimal number is used (`"12.5 rs"` → 12.5)
/// - Input with no leading number becomes zero
/// - Negative amounts become zero
/// - Amounts above [`Money::MAX_PRICE`] become `MAX_PRICE`
///
/// ## Example
/// ```rust
/// use quickbill_core::money::Money;
/// use quickbill_core::validation::coerce_price;
///
/// assert_eq!(coerce_price("25"), Money::from_rupees(25));
/// assert_eq!(coerce_price("tea"), Money::zero());
/// ```
pub fn coerce_price(raw: &str) -> Money {
    leading_number(raw)
        .and_then(Money::from_major_f64)
        .map(Money::clamp_price)
        .unwrap_or_default()
}

/// Parses the longest numeric prefix: optional sign, digits, optional
/// fraction, optional exponent.
fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Checks whether a menu row name counts as blank (dropped on save).
///
/// ## Example
/// ```rust
/// use quickbill_core::validation::is_blank_name;
///
/// assert!(is_blank_name("   "));
/// assert!(!is_blank_name(" Tea "));
/// ```
#[inline]
pub fn is_blank_name(name: &str) -> bool {
    name.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_plain_numbers() {
        assert_eq!(coerce_price("25"), Money::from_rupees(25));
        assert_eq!(coerce_price("  12.5"), Money::from_paise(1250));
        assert_eq!(coerce_price(".5"), Money::from_paise(50));
        assert_eq!(coerce_price("7."), Money::from_rupees(7));
        assert_eq!(coerce_price("1e2"), Money::from_rupees(100));
    }

    #[test]
    fn test_coerce_uses_leading_number() {
        assert_eq!(coerce_price("12abc"), Money::from_rupees(12));
        assert_eq!(coerce_price("30 rupees"), Money::from_rupees(30));
        assert_eq!(coerce_price("4e"), Money::from_rupees(4));
    }

    #[test]
    fn test_coerce_non_numeric_to_zero() {
        assert_eq!(coerce_price(""), Money::zero());
        assert_eq!(coerce_price("abc"), Money::zero());
        assert_eq!(coerce_price("."), Money::zero());
        assert_eq!(coerce_price("-"), Money::zero());
        assert_eq!(coerce_price("NaN"), Money::zero());
    }

    #[test]
    fn test_coerce_negative_to_zero() {
        assert_eq!(coerce_price("-5"), Money::zero());
    }

    #[test]
    fn test_coerce_caps_huge_prices() {
        assert_eq!(coerce_price("1e300"), Money::MAX_PRICE);
        assert_eq!(coerce_price("60000000000000000"), Money::MAX_PRICE);
        assert_eq!(coerce_price("10000000"), Money::MAX_PRICE);
    }

    #[test]
    fn test_blank_names() {
        assert!(is_blank_name(""));
        assert!(is_blank_name(" \t"));
        assert!(!is_blank_name("Tea"));
    }
}
