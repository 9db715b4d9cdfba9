//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    2.675 rounds to 2.67 (it is really 2.67499999...)                    │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    0.1 + 0.2 = 0.3 exactly                                              │
//! │    2.675 rounds half-up to 2.68                                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Request bodies carry amounts with arbitrary precision (`12.345`), so the
//! value is kept as an exact decimal and only rounded to cents where the
//! calculator says so.
//!
//! ## Usage
//! ```rust
//! use levy_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::new(Decimal::new(1099, 2)); // 10.99
//! let line = price.multiply_quantity(3);         // 32.97
//! assert_eq!(line.amount(), Decimal::new(3297, 2));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::types::TaxRate;
use crate::CURRENCY_SCALE;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the major currency unit, held as an exact decimal.
///
/// Serialized as a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Money {
    /// Wraps a decimal amount. No rounding is applied.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds to currency precision, half away from zero.
    ///
    /// For the non-negative amounts the calculator accepts this is plain
    /// half-up rounding: `0.125 → 0.13`, `0.124 → 0.12`.
    pub fn rounded(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Calculates tax at `rate`, rounded to currency precision.
    ///
    /// ## Implementation
    /// `amount × percentage / 100`, computed exactly, then rounded half-up
    /// to 2 decimals.
    ///
    /// ## Example
    /// ```rust
    /// use levy_core::money::Money;
    /// use levy_core::types::TaxRate;
    /// use rust_decimal::Decimal;
    ///
    /// let price = Money::new(Decimal::from(10));             // 10.00
    /// let rate = TaxRate::from_percentage(Decimal::new(825, 2)); // 8.25%
    ///
    /// // 10.00 × 8.25% = 0.825 → 0.83
    /// assert_eq!(price.calculate_tax(rate).amount(), Decimal::new(83, 2));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(self.0 * rate.percentage() / Decimal::ONE_HUNDRED).rounded()
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Money {
        Money(self.0 * Decimal::from(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with two decimals (debugging and logs only).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut amount = self.rounded().0;
        amount.rescale(CURRENCY_SCALE);
        write!(f, "{}", amount)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_rounding_is_half_up() {
        assert_eq!(Money::new(dec("0.125")).rounded().amount(), dec("0.13"));
        assert_eq!(Money::new(dec("0.124")).rounded().amount(), dec("0.12"));
        assert_eq!(Money::new(dec("2.675")).rounded().amount(), dec("2.68"));
        assert_eq!(Money::new(dec("100")).rounded().amount(), dec("100"));
    }

    #[test]
    fn test_tax_calculation_basic() {
        let tax = Money::new(dec("100")).calculate_tax(TaxRate::from_percentage(dec("10")));
        assert_eq!(tax.amount(), dec("10.00"));
    }

    #[test]
    fn test_tax_calculation_with_rounding() {
        // 10.00 at 8.25% = 0.825 → 0.83 (bankers rounding would give 0.82)
        let tax = Money::new(dec("10")).calculate_tax(TaxRate::from_percentage(dec("8.25")));
        assert_eq!(tax.amount(), dec("0.83"));
    }

    #[test]
    fn test_decimal_addition_is_exact() {
        let sum = Money::new(dec("0.1")) + Money::new(dec("0.2"));
        assert_eq!(sum.amount(), dec("0.3"));
    }

    #[test]
    fn test_sum_and_quantity() {
        let total: Money = [
            Money::new(dec("10")).multiply_quantity(2),
            Money::new(dec("5")).multiply_quantity(1),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.amount(), dec("25"));
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(Money::new(dec("-0.01")).is_negative());
        assert!(!Money::new(dec("0.01")).is_negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(dec("10.5")).to_string(), "10.50");
        assert_eq!(Money::new(dec("0.125")).to_string(), "0.13");
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Money::new(dec("27.50"))).unwrap();
        assert_eq!(json, "27.5");
    }
}
