//! Per-provider cost and speed model.

use rust_decimal::Decimal;

use super::types::ProviderRecord;

/// Metrics computed for one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderScore {
    /// Projected total cost in destination currency.
    pub total_cost: Decimal,
    /// Mean of the fastest and slowest delivery times.
    pub avg_speed_hours: Decimal,
    /// Indicative fee for display. Not used in `total_cost`.
    pub fees: Decimal,
}

/// Computes comparable cost and speed figures for providers.
pub struct CostModel;

impl CostModel {
    /// Scores one provider.
    ///
    /// `amount` is in source currency, `amount_usd` is the same amount
    /// expressed in USD and `rate` is destination units per source unit.
    ///
    /// `fees` is computed from the raw `amount` and the minimum percentage,
    /// while `total_cost` uses `amount_usd` and the average percentage.
    ///
    /// Returns `None` if any intermediate value overflows `Decimal`.
    #[must_use]
    pub fn score(
        provider: &ProviderRecord,
        amount: Decimal,
        amount_usd: Decimal,
        rate: Decimal,
    ) -> Option<ProviderScore> {
        let provider_rate = Self::provider_rate(rate, provider.exchange_rate_markup_min)?;
        let percentage_fee_usd = Self::percentage_fee_avg(provider)?
            .checked_div(Decimal::ONE_HUNDRED)?
            .checked_mul(amount_usd)?;
        let total_fee_usd = provider.fixed_fee_min_usd.checked_add(percentage_fee_usd)?;
        let total_cost = amount_usd
            .checked_add(total_fee_usd)?
            .checked_mul(provider_rate)?;

        Some(ProviderScore {
            total_cost,
            avg_speed_hours: Self::avg_speed_hours(provider)?,
            fees: Self::display_fees(provider, amount)?,
        })
    }

    /// Midpoint of the provider's percentage fee range.
    #[must_use]
    pub fn percentage_fee_avg(provider: &ProviderRecord) -> Option<Decimal> {
        midpoint(provider.percentage_fee_min, provider.percentage_fee_max)
    }

    /// Market rate inflated by the provider's markup.
    #[must_use]
    pub fn provider_rate(rate: Decimal, markup_percent: Decimal) -> Option<Decimal> {
        let factor = Decimal::ONE.checked_add(markup_percent.checked_div(Decimal::ONE_HUNDRED)?)?;
        rate.checked_mul(factor)
    }

    /// Midpoint of the provider's delivery window.
    #[must_use]
    pub fn avg_speed_hours(provider: &ProviderRecord) -> Option<Decimal> {
        midpoint(provider.speed_min_hours, provider.speed_max_hours)
    }

    fn display_fees(provider: &ProviderRecord, amount: Decimal) -> Option<Decimal> {
        let percentage = provider
            .percentage_fee_min
            .checked_div(Decimal::ONE_HUNDRED)?
            .checked_mul(amount)?;
        provider.fixed_fee_min_usd.checked_add(percentage)
    }
}

fn midpoint(low: Decimal, high: Decimal) -> Option<Decimal> {
    low.checked_add(high)?.checked_div(Decimal::TWO)
}
