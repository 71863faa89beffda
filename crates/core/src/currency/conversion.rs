//! Direct and cross rate resolution against a USD rate table.
//!
//! Every table is quoted as "units per 1 USD", so a pair that does not
//! involve USD is triangulated: `usd_rates[dest] / usd_rates[source]`.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::warn;

use super::rates::{BASE_CURRENCY, RateTable};
use crate::error::RecommendError;

/// Resolves scalar exchange rates from a USD rate table.
pub struct RateConverter;

impl RateConverter {
    /// Units of `dest_currency` per 1 unit of `source_currency`.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the currencies are the same.
    /// - `RateUnavailable` if a required currency is missing from the table
    ///   or the cross rate overflows.
    pub fn resolve_rate(
        source_currency: &str,
        dest_currency: &str,
        usd_rates: &RateTable,
    ) -> Result<Decimal, RecommendError> {
        Self::ensure_distinct(source_currency, dest_currency)?;

        let usd_to_dest = usd_rates.get(dest_currency).ok_or_else(|| {
            RecommendError::rate_unavailable(
                source_currency,
                dest_currency,
                format!("currency {dest_currency} not found in rates"),
            )
        })?;

        if source_currency == BASE_CURRENCY {
            return Ok(usd_to_dest);
        }

        let usd_to_source = usd_rates.get(source_currency).ok_or_else(|| {
            RecommendError::rate_unavailable(
                source_currency,
                dest_currency,
                format!("currency {source_currency} not found in rates"),
            )
        })?;

        usd_to_dest.checked_div(usd_to_source).ok_or_else(|| {
            RecommendError::rate_unavailable(
                source_currency,
                dest_currency,
                "cross rate is out of range",
            )
        })
    }

    /// Fails with `InvalidRequest` when both currencies are the same.
    ///
    /// Callers run this before contacting any rate source.
    pub fn ensure_distinct(
        source_currency: &str,
        dest_currency: &str,
    ) -> Result<(), RecommendError> {
        if source_currency == dest_currency {
            return Err(RecommendError::InvalidRequest(
                "Source and destination currencies cannot be the same".to_string(),
            ));
        }
        Ok(())
    }

    /// Symbols a rate source must return for this pair (base USD).
    #[must_use]
    pub fn required_symbols(source_currency: &str, dest_currency: &str) -> Vec<String> {
        if source_currency == BASE_CURRENCY {
            vec![dest_currency.to_string()]
        } else {
            vec![source_currency.to_string(), dest_currency.to_string()]
        }
    }

    /// Re-quotes every currency in the table against `base`.
    ///
    /// `base` itself is left out of the result, as is any currency whose
    /// rebased quote overflows.
    ///
    /// # Errors
    ///
    /// Returns `RateUnavailable` if `base` is not in the table.
    pub fn rebase(
        usd_rates: &RateTable,
        base: &str,
    ) -> Result<BTreeMap<String, Decimal>, RecommendError> {
        let usd_to_base = usd_rates.get(base).ok_or_else(|| {
            RecommendError::rate_unavailable(
                base,
                "*",
                format!("currency {base} not found in rates"),
            )
        })?;

        let mut rebased: BTreeMap<String, Decimal> = usd_rates
            .iter()
            .filter(|(code, _)| *code != base)
            .filter_map(|(code, rate)| match rate.checked_div(usd_to_base) {
                Some(quote) => Some((code.to_string(), quote)),
                None => {
                    warn!(base, currency = code, "Rebased rate overflowed, skipping");
                    None
                }
            })
            .collect();

        if base != BASE_CURRENCY
            && !rebased.contains_key(BASE_CURRENCY)
            && let Some(usd) = Decimal::ONE.checked_div(usd_to_base)
        {
            rebased.insert(BASE_CURRENCY.to_string(), usd);
        }

        Ok(rebased)
    }
}
