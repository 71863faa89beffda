//! Ranking data types.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::BASE_CURRENCY;

/// One row of the provider table.
///
/// Percentages are expressed as percent (`1.5` means 1.5%).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecord {
    /// Provider name, unique within the table.
    pub name: String,
    /// Lowest fixed fee charged, in USD.
    pub fixed_fee_min_usd: Decimal,
    /// Lowest percentage fee.
    pub percentage_fee_min: Decimal,
    /// Highest percentage fee.
    pub percentage_fee_max: Decimal,
    /// Lowest markup applied to the market exchange rate, in percent.
    pub exchange_rate_markup_min: Decimal,
    /// Fastest delivery, in hours.
    pub speed_min_hours: Decimal,
    /// Slowest delivery, in hours.
    pub speed_max_hours: Decimal,
}

impl ProviderRecord {
    /// Creates a record with every numeric field set to zero.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Ranking criterion chosen by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Lowest total cost first.
    #[default]
    Cost,
    /// Lowest average delivery time first.
    Speed,
}

impl Priority {
    /// Parses a priority. Anything other than `"speed"` means cost.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "speed" => Self::Speed,
            _ => Self::Cost,
        }
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cost => "cost",
            Self::Speed => "speed",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transfer to find a provider for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Amount to send, in source currency.
    pub amount: Decimal,
    /// Source currency code.
    pub source_currency: String,
    /// Destination currency code.
    pub dest_currency: String,
    /// Ranking criterion.
    pub priority: Priority,
}

/// How the transfer amount was expressed in USD for fee math.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsdNormalization {
    /// The source currency is USD.
    Native,
    /// Converted with this many source units per 1 USD.
    Converted {
        /// Units of source currency per 1 USD.
        usd_rate: Decimal,
    },
    /// The USD lookup failed; the raw amount stands in for USD.
    Fallback {
        /// Why the lookup failed.
        reason: String,
    },
}

impl UsdNormalization {
    /// The amount to use in USD fee calculations.
    ///
    /// `None` if the conversion overflows.
    #[must_use]
    pub fn amount_usd(&self, amount: Decimal) -> Option<Decimal> {
        match self {
            Self::Native | Self::Fallback { .. } => Some(amount),
            Self::Converted { usd_rate } => amount.checked_div(*usd_rate),
        }
    }

    /// Warning to surface to the caller, if the amount is approximate.
    #[must_use]
    pub fn warning(&self, source_currency: &str) -> Option<String> {
        match self {
            Self::Fallback { reason } => Some(format!(
                "Could not convert {source_currency} amount to {BASE_CURRENCY} ({reason}); \
                 fees were estimated treating the amount as {BASE_CURRENCY}"
            )),
            Self::Native | Self::Converted { .. } => None,
        }
    }
}

/// One provider's computed metrics for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredProvider {
    /// Provider name.
    pub provider: String,
    /// Projected total cost in destination currency.
    pub total_cost: Decimal,
    /// Mean of the fastest and slowest delivery times.
    pub avg_speed_hours: Decimal,
    /// Amount received at the market rate.
    pub destination_amount: Decimal,
    /// Market rate used (dest units per source unit).
    pub exchange_rate: Decimal,
    /// Indicative fee for display.
    pub fees: Decimal,
    /// Source currency code.
    pub source_currency: String,
    /// Destination currency code.
    pub dest_currency: String,
}

/// Savings statistics over a ranked set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Highest total cost.
    pub baseline_cost: Decimal,
    /// Lowest total cost.
    pub best_cost: Decimal,
    /// `baseline_cost - best_cost`.
    pub savings: Decimal,
    /// Savings as a percentage of the baseline.
    pub savings_percentage: Decimal,
    /// Number of scored providers.
    pub total_providers: usize,
}

/// Full answer to a transfer request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationResult {
    /// Winner under the applied priority.
    pub best: ScoredProvider,
    /// Every provider, best first.
    pub providers: Vec<ScoredProvider>,
    /// Savings statistics.
    pub summary: Summary,
    /// Priority actually used for ordering.
    pub priority: Priority,
    /// Non-fatal issues that affect accuracy.
    pub warnings: Vec<String>,
}
