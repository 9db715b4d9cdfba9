//! # levy-core: Pure Business Logic for Levy
//!
//! This crate contains the tax math, rate resolution and input validation
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Levy Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum handlers)                     │   │
//! │  │   /tax/calculate, /tax/rates, /users/ ...                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ levy-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   rates   │  │ validation│  │   │
//! │  │   │  TaxRate  │  │   Money   │  │ RateTable │  │   rules   │  │   │
//! │  │   │ LineItem  │  │           │  │  resolve  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                        ┌───────────┐                            │   │
//! │  │                        │    tax    │  compute / compute_items   │   │
//! │  │                        └───────────┘                            │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    levy-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, sessions               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (TaxRate, LineItem, TaxResult, User)
//! - [`money`] - Money type over exact decimals (no floating point!)
//! - [`rates`] - Static rate table and rate resolution
//! - [`tax`] - Tax calculator for single amounts and line items
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use levy_core::money::Money;
//! use levy_core::rates::RateTable;
//! use levy_core::tax;
//! use rust_decimal::Decimal;
//!
//! let rates = RateTable::default();
//! let rate = rates.resolve(None, "UK").unwrap();
//!
//! let result = tax::compute(Money::new(Decimal::from(100)), rate, "UK").unwrap();
//! assert_eq!(result.tax_amount.amount(), Decimal::from(20));
//! assert_eq!(result.total_amount.amount(), Decimal::from(120));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod rates;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use rates::RateTable;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Country code applied when a request does not name one.
pub const DEFAULT_COUNTRY_CODE: &str = "KR";

/// Number of decimal places amounts are rounded to.
pub const CURRENCY_SCALE: u32 = 2;

/// Largest amount (or unit price) accepted by the calculator.
///
/// ## Business Reason
/// Keeps `price × quantity × rate` far away from the 96-bit decimal limit
/// even for the largest allowed item list.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Maximum number of line items in a single calculation.
pub const MAX_LINE_ITEMS: usize = 1_000;

/// Page size used when a listing request does not give one.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Maximum username length (characters).
pub const MAX_USERNAME_LEN: usize = 50;

/// Maximum email length (characters).
pub const MAX_EMAIL_LEN: usize = 255;
