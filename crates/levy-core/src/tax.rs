//! # Tax Calculator
//!
//! Pure functions turning an amount (or a list of line items) and a resolved
//! rate into a [`TaxResult`].
//!
//! ## Order of Operations
//! ```text
//! original = round(amount)                      ← or Σ price × quantity
//! tax      = round(amount × rate / 100)         ← from the unrounded amount
//! total    = original + tax                     ← from the ROUNDED tax
//! ```
//!
//! Computing the total from the rounded tax (instead of rounding
//! `amount × (1 + rate)`) keeps `total == original + tax` true to the cent.
//! Rounding is half-up at 2 decimals, see [`Money::rounded`].

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{LineItem, TaxRate, TaxResult};
use crate::validation;

/// Computes tax for a single amount.
///
/// ## Errors
/// `CoreError::Validation` if the amount is negative or above `MAX_AMOUNT`.
///
/// ## Example
/// ```rust
/// use levy_core::{tax, Money, TaxRate};
/// use rust_decimal::Decimal;
///
/// let result = tax::compute(
///     Money::new(Decimal::from(100)),
///     TaxRate::from_percentage(Decimal::from(10)),
///     "KR",
/// )
/// .unwrap();
///
/// assert_eq!(result.tax_amount.amount(), Decimal::from(10));
/// assert_eq!(result.total_amount.amount(), Decimal::from(110));
/// ```
pub fn compute(amount: Money, rate: TaxRate, country_code: &str) -> CoreResult<TaxResult> {
    validation::validate_amount("amount", amount)?;
    Ok(apply(amount, rate, country_code))
}

/// Computes tax for a list of line items.
///
/// The taxable amount is `Σ price × quantity`, where a missing price counts
/// as 0 and a missing quantity as 1. An empty list yields all-zero amounts.
///
/// ## Errors
/// `CoreError::Validation` if the list is too long or a price is invalid.
pub fn compute_items(items: &[LineItem], rate: TaxRate, country_code: &str) -> CoreResult<TaxResult> {
    validation::validate_line_items(items)?;
    let subtotal: Money = items.iter().map(LineItem::line_total).sum();
    Ok(apply(subtotal, rate, country_code))
}

fn apply(amount: Money, rate: TaxRate, country_code: &str) -> TaxResult {
    let original_amount = amount.rounded();
    let tax_amount = amount.calculate_tax(rate);
    let total_amount = original_amount + tax_amount;

    TaxResult {
        original_amount,
        tax_amount,
        total_amount,
        tax_rate: rate,
        country_code: country_code.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
