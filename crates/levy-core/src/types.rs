//! # Domain Types
//!
//! Core domain types used throughout Levy.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │    LineItem     │   │   TaxResult     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  percentage     │   │  price?         │   │  original       │       │
//! │  │  20 = 20%       │   │  quantity? (=1) │   │  tax / total    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │      User       │   persisted by levy-db                            │
//! │  │  id, username   │                                                    │
//! │  │  email, hash    │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `LineItem` and `TaxResult` live for a single request and are never stored.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate expressed as a percentage (`7.5` means 7.5%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl TaxRate {
    /// Creates a tax rate from a percentage.
    #[inline]
    pub const fn from_percentage(pct: Decimal) -> Self {
        TaxRate(pct)
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percentage(&self) -> Decimal {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A price/quantity pair contributing to a taxable total.
///
/// Both fields are optional on the wire: a missing price counts as `0` and a
/// missing quantity as `1`, so a sparse item never fails the calculation.
/// Quantity also accepts whole-valued floats (`2.0`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub quantity: Option<u32>,
}

fn deserialize_quantity<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Quantity {
        Whole(u32),
        Float(f64),
    }

    match Option::<Quantity>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Quantity::Whole(n)) => Ok(Some(n)),
        Some(Quantity::Float(f)) if f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f) => {
            Ok(Some(f as u32))
        }
        Some(Quantity::Float(f)) => Err(de::Error::custom(format!(
            "quantity must be a non-negative whole number, got {f}"
        ))),
    }
}

impl LineItem {
    pub fn new(price: Decimal, quantity: u32) -> Self {
        LineItem {
            price: Some(price),
            quantity: Some(quantity),
        }
    }

    /// Unit price, defaulting to zero.
    #[inline]
    pub fn price(&self) -> Money {
        Money::new(self.price.unwrap_or(Decimal::ZERO))
    }

    /// Quantity, defaulting to one.
    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }

    /// `price × quantity`, unrounded.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price().multiply_quantity(self.quantity())
    }
}

// =============================================================================
// Tax Result
// =============================================================================

/// Outcome of a tax calculation.
///
/// All three amounts are rounded to currency precision and
/// `total_amount == original_amount + tax_amount` holds exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub original_amount: Money,
    pub tax_amount: Money,
    pub total_amount: Money,
    /// Percentage that was applied.
    pub tax_rate: TaxRate,
    pub country_code: String,
}

// =============================================================================
// User
// =============================================================================

/// A registered user.
///
/// `hashed_password` is an argon2 PHC string; it is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Auto-assigned row id.
    pub id: i64,

    /// Unique login name (1..=50 characters).
    pub username: String,

    /// Unique email address (1..=255 characters).
    pub email: String,

    #[serde(skip_serializing)]
    pub hashed_password: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
