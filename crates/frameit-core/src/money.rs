//! # Money Module
//!
//! Provides the `Money` type for rupee amounts on a bill.
//!
//! ## Why Floating Point Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BILLING NUMBERS ARE DISPLAY NUMBERS                                    │
//! │                                                                         │
//! │  Nothing downstream reconciles these amounts: there is no ledger,      │
//! │  no payment capture and no persistence. Every figure is recomputed     │
//! │  from the order items on each render and shown with 2 decimals.        │
//! │                                                                         │
//! │    price "100" × qty 2            = 200.00                              │
//! │    200.00 × 18%                   =  36.00                              │
//! │    200.00 + 36.00                 = 236.00                              │
//! │                                                                         │
//! │  Display rounding is half-away-from-zero at 2 decimals.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use frameit_core::money::Money;
//!
//! let price = Money::new(99.5);
//! let line = price * 2.0;
//! assert_eq!(line.fixed2(), "199.00");
//! assert_eq!(line.to_string(), "₹199.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

/// Currency symbol used by [`Money`]'s `Display` implementation.
pub const RUPEE_SYMBOL: &str = "₹";

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount.
///
/// ## Where Money is Used
/// ```text
/// OrderItem.price ──► parse ──► Money ──► line subtotal ──► GST ──► total
///                                              │
///                                              └──► BillTotals (sum)
///                                                        │
///                                                        └──► CGST / SGST halves
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(f64);

impl Money {
    /// Creates a Money value from a rupee amount.
    #[inline]
    pub const fn new(amount: f64) -> Self {
        Money(amount)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0.0)
    }

    /// Returns the raw rupee amount.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Returns half of this amount.
    ///
    /// Used for the CGST/SGST presentation split.
    #[inline]
    pub fn half(&self) -> Self {
        Money(self.0 / 2.0)
    }

    /// Rounds to whole paise (2 decimals), half away from zero.
    pub fn round_to_paise(&self) -> Self {
        let rounded = (self.0 * 100.0).round() / 100.0;
        // -0.0 would print as "-0.00"
        if rounded == 0.0 {
            Money(0.0)
        } else {
            Money(rounded)
        }
    }

    /// Formats the amount with exactly two decimals and no symbol.
    ///
    /// ## Example
    /// ```rust
    /// use frameit_core::money::Money;
    ///
    /// assert_eq!(Money::new(36.0).fixed2(), "36.00");
    /// assert_eq!(Money::new(0.125).fixed2(), "0.13");
    /// ```
    pub fn fixed2(&self) -> String {
        format!("{:.2}", self.round_to_paise().0)
    }

    /// Formats the amount with a caller-chosen currency label.
    ///
    /// The PDF's built-in fonts carry no rupee glyph, so the exporter
    /// prints `Rs. 236.00` instead of `₹236.00`.
    pub fn with_label(&self, label: &str) -> String {
        if label.is_empty() {
            self.fixed2()
        } else if label.chars().all(|c| c.is_alphabetic() || c == '.') {
            format!("{} {}", label, self.fixed2())
        } else {
            format!("{}{}", label, self.fixed2())
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", RUPEE_SYMBOL, self.fixed2())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Multiplication by a scalar (quantity, tax fraction).
impl Mul<f64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: f64) -> Self {
        Money(self.0 * factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::new(10.99)), "₹10.99");
        assert_eq!(format!("{}", Money::new(5.0)), "₹5.00");
        assert_eq!(format!("{}", Money::zero()), "₹0.00");
    }

    #[test]
    fn test_fixed2_rounds_half_away_from_zero() {
        assert_eq!(Money::new(0.125).fixed2(), "0.13");
        assert_eq!(Money::new(1.5).fixed2(), "1.50");
        assert_eq!(Money::new(36.0).fixed2(), "36.00");
    }

    #[test]
    fn test_negative_zero_prints_as_zero() {
        assert_eq!(Money::new(-0.0).fixed2(), "0.00");
        assert_eq!(Money::new(-0.001).fixed2(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(10.0);
        let b = Money::new(5.5);

        assert_eq!((a + b).amount(), 15.5);
        assert_eq!((a * 3.0).amount(), 30.0);

        let mut c = a;
        c += b;
        assert_eq!(c.amount(), 15.5);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![Money::new(1.0), Money::new(2.5), Money::new(3.25)];
        let by_ref: Money = amounts.iter().sum();
        let by_value: Money = amounts.into_iter().sum();
        assert_eq!(by_ref.amount(), 6.75);
        assert_eq!(by_value.amount(), 6.75);
    }

    #[test]
    fn test_half() {
        assert_eq!(Money::new(36.0).half().fixed2(), "18.00");
        assert_eq!(Money::new(0.05).half().fixed2(), "0.03");
    }

    #[test]
    fn test_with_label() {
        let m = Money::new(236.0);
        assert_eq!(m.with_label("Rs."), "Rs. 236.00");
        assert_eq!(m.with_label("₹"), "₹236.00");
        assert_eq!(m.with_label(""), "236.00");
    }
}
