//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹12.50 is stored as 1250 paise, sums are exact                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Stored documents keep prices as plain JSON numbers in rupees, so `Money`
//! serializes as a major-unit number: `2000` paise ⇄ `20`, `1250` paise ⇄
//! `12.5`. This is the only place floats appear, and they are rounded to
//! the nearest paisa on the way in.
//!
//! ## Usage
//! ```rust
//! use quickbill_core::money::Money;
//!
//! let price = Money::from_rupees(20);       // ₹20.00
//! let line = price.multiply_quantity(2);     // ₹40.00
//! assert_eq!(line.to_string(), "40.00");
//! assert_eq!(Money::from_paise(12345600).format_inr(), "₹1,23,456.00");
//! ```

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in paise (1/100 rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction in totals checks never underflows
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Saturating arithmetic**: sums and line totals stop at the i64 bounds
/// - **Custom serde**: major-unit JSON numbers on the wire, clamped to
///   `0..=MAX_PRICE`
///
/// ## Where Money is Used
/// ```text
/// MenuItem.price ──► BillItem.price ──► BillItem::line_total()
///                                            │
///                                            ▼
///                        Order::subtotal() = Order::total()
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Largest unit price accepted from operator input or stored documents:
    /// ₹1,00,00,000 (one crore).
    ///
    /// A line of `MAX_PRICE` at `u32::MAX` quantity still fits in i64.
    pub const MAX_PRICE: Money = Money(10_000_000 * 100);

    /// Creates a Money value from paise (the smallest currency unit).
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use quickbill_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(25).paise(), 2500);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees.saturating_mul(100))
    }

    /// Creates a Money value from a major-unit float, rounded to the
    /// nearest paisa.
    ///
    /// Returns `None` for NaN and infinities. Values beyond the i64 range
    /// saturate.
    ///
    /// ## Example
    /// ```rust
    /// use quickbill_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_f64(12.5), Some(Money::from_paise(1250)));
    /// assert_eq!(Money::from_major_f64(19.99), Some(Money::from_paise(1999)));
    /// assert_eq!(Money::from_major_f64(f64::NAN), None);
    /// ```
    pub fn from_major_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Some(Money((value * 100.0).round() as i64))
    }

    /// Clamps a unit price into `0..=MAX_PRICE`.
    ///
    /// ## Example
    /// ```rust
    /// use quickbill_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(-5).clamp_price(), Money::zero());
    /// assert_eq!(Money::from_paise(i64::MAX).clamp_price(), Money::MAX_PRICE);
    /// ```
    #[inline]
    pub fn clamp_price(self) -> Self {
        self.clamp(Money::zero(), Money::MAX_PRICE)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use quickbill_core::money::Money;
    ///
    /// let unit_price = Money::from_rupees(20);
    /// assert_eq!(unit_price.multiply_quantity(3).paise(), 6000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Formats the amount with Indian digit grouping and two decimals,
    /// without a currency symbol.
    ///
    /// ## Indian Grouping
    /// ```text
    /// 1234        → 1,234.00
    /// 123456      → 1,23,456.00
    /// 12345678    → 1,23,45,678.00
    /// ```
    pub fn format_grouped(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let digits = self.rupees().abs().to_string();
        format!("{}{}.{:02}", sign, group_indian(&digits), self.paise_part())
    }

    /// Formats the amount as shown in the receipt grand total: `₹1,23,456.00`.
    pub fn format_inr(&self) -> String {
        let grouped = self.format_grouped();
        match grouped.strip_prefix('-') {
            Some(abs) => format!("-₹{}", abs),
            None => format!("₹{}", grouped),
        }
    }
}

/// Inserts Indian-style separators into a string of ASCII digits: the last
/// three digits form one group, everything before groups in pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);

    // Pairs are counted from the right, so an odd-length head starts with
    // a single digit.
    let first = head.len() % 2;
    if first == 1 {
        out.push_str(&head[..1]);
    }
    for (i, pair) in head.as_bytes()[first..].chunks(2).enumerate() {
        if i > 0 || first == 1 {
            out.push(',');
        }
        out.push_str(std::str::from_utf8(pair).unwrap_or_default());
    }

    out.push(',');
    out.push_str(last_three);
    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering used for receipt line amounts: `40.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Serde (major-unit JSON numbers)
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.paise_part() == 0 {
            serializer.serialize_i64(self.rupees())
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an amount in rupees")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(Money::from_rupees(v).clamp_price())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Ok(Money::from_rupees(i64::try_from(v).unwrap_or(i64::MAX)).clamp_price())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_major_f64(v)
            .map(Money::clamp_price)
            .ok_or_else(|| E::custom("amount is not a finite number"))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(25);
        assert_eq!(money.paise(), 2500);
        assert_eq!(money.rupees(), 25);
        assert_eq!(money.paise_part(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paise(6500).to_string(), "65.00");
        assert_eq!(Money::from_paise(1250).to_string(), "12.50");
        assert_eq!(Money::from_paise(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(10);
        let b = Money::from_rupees(5);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((a * 3).paise(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total, Money::from_rupees(20));
    }

    #[test]
    fn test_float_parts_add_exactly() {
        // 0.1 + 0.2 in rupees stays exact once converted to paise
        let a = Money::from_major_f64(0.1).unwrap();
        let b = Money::from_major_f64(0.2).unwrap();
        assert_eq!(a + b, Money::from_paise(30));
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(Money::from_rupees(0).format_grouped(), "0.00");
        assert_eq!(Money::from_rupees(65).format_grouped(), "65.00");
        assert_eq!(Money::from_rupees(999).format_grouped(), "999.00");
        assert_eq!(Money::from_rupees(1234).format_grouped(), "1,234.00");
        assert_eq!(Money::from_rupees(12345).format_grouped(), "12,345.00");
        assert_eq!(Money::from_rupees(123456).format_grouped(), "1,23,456.00");
        assert_eq!(Money::from_rupees(12345678).format_grouped(), "1,23,45,678.00");
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(Money::from_rupees(65).format_inr(), "₹65.00");
        assert_eq!(Money::from_paise(-123450).format_inr(), "-₹1,234.50");
    }

    #[test]
    fn test_serializes_as_major_units() {
        assert_eq!(serde_json::to_string(&Money::from_rupees(15)).unwrap(), "15");
        assert_eq!(serde_json::to_string(&Money::from_paise(1250)).unwrap(), "12.5");
    }

    #[test]
    fn test_deserializes_integers_and_floats() {
        let whole: Money = serde_json::from_str("20").unwrap();
        assert_eq!(whole, Money::from_rupees(20));

        let fractional: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(fractional, Money::from_paise(1250));

        assert!(serde_json::from_str::<Money>("\"20\"").is_err());
    }

    #[test]
    fn test_deserialize_clamps_out_of_range_prices() {
        let negative: Money = serde_json::from_str("-5").unwrap();
        assert_eq!(negative, Money::zero());

        let negative_fraction: Money = serde_json::from_str("-0.5").unwrap();
        assert_eq!(negative_fraction, Money::zero());

        let huge: Money = serde_json::from_str("1e300").unwrap();
        assert_eq!(huge, Money::MAX_PRICE);

        let huge_int: Money = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(huge_int, Money::MAX_PRICE);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let top = Money::from_paise(i64::MAX);
        assert_eq!(top + Money::from_paise(1), top);
        assert_eq!(top.multiply_quantity(2), top);
        assert_eq!(Money::from_paise(i64::MIN) - Money::from_paise(1), Money::from_paise(i64::MIN));

        let mut acc = top;
        acc += top;
        assert_eq!(acc, top);

        let total: Money = [top, top, top].into_iter().sum();
        assert_eq!(total, top);
    }

    #[test]
    fn test_max_price_line_fits() {
        let line = Money::MAX_PRICE.multiply_quantity(u32::MAX);
        assert_eq!(line.paise(), 1_000_000_000 * u32::MAX as i64);
    }
}
