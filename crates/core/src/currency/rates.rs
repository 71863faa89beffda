//! USD-relative rate table.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Currency every table is quoted against.
pub const BASE_CURRENCY: &str = "USD";

/// Units of each currency per 1 USD.
///
/// Only positive rates are ever stored. `USD` itself is implicitly `1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RateTable {
    rates: BTreeMap<String, Decimal>,
    timestamp: Option<DateTime<Utc>>,
}

impl RateTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(code, rate)` quotes, dropping non-positive rates.
    pub fn from_quotes<I, S>(quotes: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (code, rate) in quotes {
            table.insert(code, rate);
        }
        table
    }

    /// Sets the time the quotes were published.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Inserts a quote. Returns `false` and leaves the table untouched when
    /// the rate is not positive.
    pub fn insert(&mut self, code: impl Into<String>, rate: Decimal) -> bool {
        if rate <= Decimal::ZERO {
            return false;
        }
        self.rates.insert(code.into(), rate);
        true
    }

    /// Units of `code` per 1 USD.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<Decimal> {
        match self.rates.get(code) {
            Some(rate) => Some(*rate),
            None if code == BASE_CURRENCY => Some(Decimal::ONE),
            None => None,
        }
    }

    /// Returns true if a rate for `code` is known.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Keeps only the requested codes. An empty filter keeps everything.
    #[must_use]
    pub fn retain_symbols(mut self, symbols: &[String]) -> Self {
        if !symbols.is_empty() {
            self.rates.retain(|code, _| symbols.iter().any(|s| s == code));
        }
        self
    }

    /// Time the quotes were published, if the source reported it.
    #[must_use]
    pub const fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Number of explicit quotes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if there are no explicit quotes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Iterates quotes in currency code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_usd_is_implicit() {
        let table = RateTable::new();
        assert_eq!(table.get("USD"), Some(Decimal::ONE));
        assert!(table.contains("USD"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_non_positive_rates_are_dropped() {
        let table = RateTable::from_quotes([
            ("EUR", dec!(0.92)),
            ("ZERO", Decimal::ZERO),
            ("NEG", dec!(-1.5)),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("EUR"), Some(dec!(0.92)));
        assert_eq!(table.get("ZERO"), None);
        assert_eq!(table.get("NEG"), None);
    }

    #[test]
    fn test_retain_symbols() {
        let table = RateTable::from_quotes([
            ("EUR", dec!(0.9)),
            ("GBP", dec!(0.8)),
            ("JPY", dec!(150)),
        ]);

        let filtered = table.clone().retain_symbols(&["GBP".to_string()]);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.contains("GBP"));

        let unfiltered = table.retain_symbols(&[]);
        assert_eq!(unfiltered.len(), 3);
    }

    #[test]
    fn test_iter_is_ordered_by_code() {
        let table = RateTable::from_quotes([("NGN", dec!(1500)), ("EUR", dec!(0.9))]);
        let codes: Vec<&str> = table.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["EUR", "NGN"]);
    }
}
