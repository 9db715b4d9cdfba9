//! # Rate Resolution
//!
//! The static country → percentage table and the rule that picks the rate
//! a calculation uses.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve(explicit, country_code)                                        │
//! │                                                                         │
//! │  explicit = Some(r), r != 0 ──► r   (country code is not consulted)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  country_code in table ───────► table[country_code]                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  explicit = Some(0) ──────────► 0                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UnknownCountry(country_code)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An absent explicit rate means "use the country's rate". The request
//! layer never substitutes a literal default for it, otherwise the country
//! branch could never be reached.
//!
//! The table is built once at startup and never mutated afterwards; share it
//! behind an `Arc`.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::types::TaxRate;
use crate::validation;

/// Rates shipped with the service, in percent.
const DEFAULT_RATES: &[(&str, i64, u32)] = &[
    // (country_code, mantissa, scale)
    ("KR", 100, 1), // 10.0%
    ("US", 75, 1),  // 7.5%
    ("JP", 100, 1), // 10.0%
    ("CN", 130, 1), // 13.0%
    ("UK", 200, 1), // 20.0%
];

/// Immutable mapping of country code → tax rate.
///
/// Codes are matched exactly (case-sensitive). Iteration order is
/// alphabetical by code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    rates: BTreeMap<String, TaxRate>,
}

impl RateTable {
    /// Builds a table from `(code, rate)` pairs. Later duplicates win.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, TaxRate)>,
        S: Into<String>,
    {
        RateTable {
            rates: entries
                .into_iter()
                .map(|(code, rate)| (code.into(), rate))
                .collect(),
        }
    }

    /// All known rates.
    pub fn list(&self) -> &BTreeMap<String, TaxRate> {
        &self.rates
    }

    /// Number of countries in the table.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Looks up the rate for one country.
    ///
    /// ## Errors
    /// `CoreError::UnknownCountry` if the code is not in the table.
    pub fn get(&self, country_code: &str) -> CoreResult<TaxRate> {
        self.rates
            .get(country_code)
            .copied()
            .ok_or_else(|| CoreError::UnknownCountry(country_code.to_string()))
    }

    /// Picks the effective rate for a calculation.
    ///
    /// ## Errors
    /// - `CoreError::Validation` if the explicit rate is outside 0..=100
    /// - `CoreError::UnknownCountry` if no explicit rate was given and the
    ///   country is not in the table
    pub fn resolve(&self, explicit: Option<TaxRate>, country_code: &str) -> CoreResult<TaxRate> {
        if let Some(rate) = explicit {
            validation::validate_tax_rate(rate)?;
            if !rate.is_zero() {
                return Ok(rate);
            }
        }

        match (self.rates.get(country_code), explicit) {
            (Some(rate), _) => Ok(*rate),
            (None, Some(zero)) => Ok(zero),
            (None, None) => Err(CoreError::UnknownCountry(country_code.to_string())),
        }
    }
}

impl Default for RateTable {
    fn default() -> Self {
        RateTable::from_entries(DEFAULT_RATES.iter().map(|&(code, mantissa, scale)| {
            (code, TaxRate::from_percentage(Decimal::new(mantissa, scale)))
        }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(s: &str) -> TaxRate {
        TaxRate::from_percentage(s.parse().unwrap())
    }

    #[test]
    fn test_default_table() {
        let table = RateTable::default();
        assert_eq!(table.len(), 5);
        assert_eq!(table.get("KR").unwrap(), pct("10"));
        assert_eq!(table.get("US").unwrap(), pct("7.5"));
        assert_eq!(table.get("JP").unwrap(), pct("10"));
        assert_eq!(table.get("CN").unwrap(), pct("13"));
        assert_eq!(table.get("UK").unwrap(), pct("20"));
    }

    #[test]
    fn test_get_unknown_country() {
        let err = RateTable::default().get("FR").unwrap_err();
        assert!(matches!(err, CoreError::UnknownCountry(ref code) if code == "FR"));
    }

    #[test]
    fn test_get_is_case_sensitive() {
        assert!(RateTable::default().get("uk").is_err());
    }

    #[test]
    fn test_list_is_alphabetical() {
        let table = RateTable::default();
        let codes: Vec<&str> = table.list().keys().map(String::as_str).collect();
        assert_eq!(codes, vec!["CN", "JP", "KR", "UK", "US"]);
    }

    #[test]
    fn test_explicit_rate_wins_over_country() {
        let table = RateTable::default();
        assert_eq!(table.resolve(Some(pct("5")), "UK").unwrap(), pct("5"));
        // Even for a country the table does not know.
        assert_eq!(table.resolve(Some(pct("5")), "FR").unwrap(), pct("5"));
    }

    #[test]
    fn test_absent_rate_uses_country() {
        let table = RateTable::default();
        assert_eq!(table.resolve(None, "UK").unwrap(), pct("20"));
        assert_eq!(table.resolve(None, "KR").unwrap(), pct("10"));
    }

    #[test]
    fn test_zero_rate_falls_back_to_country() {
        let table = RateTable::default();
        assert_eq!(table.resolve(Some(pct("0")), "JP").unwrap(), pct("10"));
    }

    #[test]
    fn test_zero_rate_unknown_country_passes_through() {
        let table = RateTable::default();
        assert!(table.resolve(Some(pct("0")), "FR").unwrap().is_zero());
    }

    #[test]
    fn test_absent_rate_unknown_country_fails() {
        let err = RateTable::default().resolve(None, "FR").unwrap_err();
        assert_eq!(err.to_string(), "Tax rate for country code 'FR' not found");
    }

    #[test]
    fn test_explicit_rate_out_of_range() {
        let table = RateTable::default();
        assert!(matches!(
            table.resolve(Some(pct("100.01")), "KR"),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            table.resolve(Some(pct("-1")), "KR"),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(table.resolve(Some(pct("100")), "KR").unwrap(), pct("100"));
    }

    #[test]
    fn test_custom_table() {
        let table = RateTable::from_entries([("FR", pct("20")), ("DE", pct("19"))]);
        assert_eq!(table.resolve(None, "DE").unwrap(), pct("19"));
        assert!(table.get("KR").is_err());
    }
}
