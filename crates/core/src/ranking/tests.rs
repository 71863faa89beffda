//! Property-based tests for the ranking module.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::RankingEngine;
use super::types::{Priority, ProviderRecord, TransferRequest, UsdNormalization};
use crate::currency::RateTable;
use crate::error::RecommendError;

/// Decimal with two places in `[0, max_cents / 100)`.
fn cents(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (0i64..max_cents).prop_map(|c| Decimal::new(c, 2))
}

fn provider() -> impl Strategy<Value = ProviderRecord> {
    (
        cents(5_000),
        cents(500),
        cents(500),
        cents(500),
        cents(10_000),
        cents(100_000),
    )
        .prop_map(|(fixed, pct_a, pct_b, markup, speed_a, speed_b)| ProviderRecord {
            name: String::new(),
            fixed_fee_min_usd: fixed,
            percentage_fee_min: pct_a.min(pct_b),
            percentage_fee_max: pct_a.max(pct_b),
            exchange_rate_markup_min: markup,
            speed_min_hours: speed_a.min(speed_b),
            speed_max_hours: speed_a.max(speed_b),
        })
}

/// 1..20 providers with distinct names in table order.
fn provider_table() -> impl Strategy<Value = Vec<ProviderRecord>> {
    prop::collection::vec(provider(), 1..20).prop_map(|mut providers| {
        for (i, p) in providers.iter_mut().enumerate() {
            p.name = format!("P{i}");
        }
        providers
    })
}

fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000).prop_map(|c| Decimal::new(c, 2))
}

fn rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000).prop_map(|v| Decimal::new(v, 4))
}

/// Positive decimal anywhere between 1e-28 and `i64::MAX`.
fn extreme() -> impl Strategy<Value = Decimal> {
    (1i64..=i64::MAX, 0u32..=28).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn priority() -> impl Strategy<Value = Priority> {
    prop_oneof![Just(Priority::Cost), Just(Priority::Speed)]
}

fn request(amount: Decimal, priority: Priority) -> TransferRequest {
    TransferRequest {
        amount,
        source_currency: "USD".to_string(),
        dest_currency: "NGN".to_string(),
        priority,
    }
}

fn table(rate: Decimal) -> RateTable {
    RateTable::from_quotes([("NGN", rate)])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Cost priority: the winner has the minimum total cost.
    #[test]
    fn prop_cost_winner_is_cheapest(
        providers in provider_table(),
        amount in amount(),
        rate in rate(),
    ) {
        let result = RankingEngine::recommend(
            &providers,
            &request(amount, Priority::Cost),
            &table(rate),
            &UsdNormalization::Native,
        ).unwrap();

        let min = result.providers.iter().map(|p| p.total_cost).min().unwrap();
        prop_assert_eq!(result.best.total_cost, min);
    }

    /// Speed priority: the winner has the minimum average speed.
    #[test]
    fn prop_speed_winner_is_fastest(
        providers in provider_table(),
        amount in amount(),
        rate in rate(),
    ) {
        let result = RankingEngine::recommend(
            &providers,
            &request(amount, Priority::Speed),
            &table(rate),
            &UsdNormalization::Native,
        ).unwrap();

        let min = result.providers.iter().map(|p| p.avg_speed_hours).min().unwrap();
        prop_assert_eq!(result.best.avg_speed_hours, min);
    }

    /// The ranked list is sorted ascending and contains every provider once.
    #[test]
    fn prop_ranked_list_is_sorted_permutation(
        providers in provider_table(),
        amount in amount(),
        rate in rate(),
        priority in priority(),
    ) {
        let result = RankingEngine::recommend(
            &providers,
            &request(amount, priority),
            &table(rate),
            &UsdNormalization::Native,
        ).unwrap();

        prop_assert_eq!(result.providers.len(), providers.len());
        prop_assert_eq!(result.summary.total_providers, providers.len());

        for pair in result.providers.windows(2) {
            let (a, b) = match priority {
                Priority::Cost => (pair[0].total_cost, pair[1].total_cost),
                Priority::Speed => (pair[0].avg_speed_hours, pair[1].avg_speed_hours),
            };
            prop_assert!(a <= b);
        }

        let mut names: Vec<&str> = result.providers.iter().map(|p| p.provider.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(names.len(), providers.len());
    }

    /// Savings is the worst-to-best delta and never negative.
    #[test]
    fn prop_savings_is_baseline_minus_best(
        providers in provider_table(),
        amount in amount(),
        rate in rate(),
        priority in priority(),
    ) {
        let result = RankingEngine::recommend(
            &providers,
            &request(amount, priority),
            &table(rate),
            &UsdNormalization::Native,
        ).unwrap();

        let summary = &result.summary;
        prop_assert_eq!(summary.savings, summary.baseline_cost - summary.best_cost);
        prop_assert!(summary.savings >= Decimal::ZERO);
        prop_assert!(summary.savings_percentage >= Decimal::ZERO);
        prop_assert!(summary.savings_percentage <= Decimal::ONE_HUNDRED);
    }

    /// Same inputs, same ordering.
    #[test]
    fn prop_ranking_is_deterministic(
        providers in provider_table(),
        amount in amount(),
        rate in rate(),
        priority in priority(),
    ) {
        let run = || RankingEngine::recommend(
            &providers,
            &request(amount, priority),
            &table(rate),
            &UsdNormalization::Native,
        ).unwrap();

        prop_assert_eq!(run().providers, run().providers);
    }

    /// Extreme quotes either rank or fail cleanly, never panic.
    #[test]
    fn prop_extreme_quotes_never_panic(
        providers in provider_table(),
        amount in extreme(),
        source_quote in extreme(),
        dest_quote in extreme(),
        priority in priority(),
    ) {
        let request = TransferRequest {
            amount,
            source_currency: "BTC".to_string(),
            dest_currency: "IRR".to_string(),
            priority,
        };
        let table = RateTable::from_quotes([("BTC", source_quote), ("IRR", dest_quote)]);

        match RankingEngine::recommend(
            &providers,
            &request,
            &table,
            &UsdNormalization::Converted { usd_rate: source_quote },
        ) {
            Ok(result) => prop_assert!(result.providers.len() <= providers.len()),
            Err(err) => prop_assert!(matches!(
                err,
                RecommendError::RateUnavailable { .. } | RecommendError::NoProviders
            ), "unexpected error: {:?}", err),
        }
    }

    /// Identical currencies are rejected whatever the amount or priority.
    #[test]
    fn prop_same_currency_always_invalid(
        providers in provider_table(),
        amount in amount(),
        priority in priority(),
        code in "[A-Z]{3}",
    ) {
        let request = TransferRequest {
            amount,
            source_currency: code.clone(),
            dest_currency: code,
            priority,
        };
        let err = RankingEngine::recommend(
            &providers,
            &request,
            &table(Decimal::ONE),
            &UsdNormalization::Native,
        ).unwrap_err();

        prop_assert!(matches!(err, RecommendError::InvalidRequest(_)));
    }
}

mod unit_tests {
    use super::*;

    /// All-free providers give a zero baseline and zero percentage.
    #[test]
    fn test_zero_baseline_has_zero_percentage() {
        let providers = vec![ProviderRecord::new("Free"), ProviderRecord::new("AlsoFree")];
        let request = TransferRequest {
            amount: Decimal::ZERO,
            source_currency: "USD".to_string(),
            dest_currency: "NGN".to_string(),
            priority: Priority::Cost,
        };

        let result = RankingEngine::recommend(
            &providers,
            &request,
            &table(Decimal::ONE),
            &UsdNormalization::Native,
        )
        .unwrap();

        assert_eq!(result.summary.baseline_cost, Decimal::ZERO);
        assert_eq!(result.summary.savings_percentage, Decimal::ZERO);
        assert_eq!(result.best.provider, "Free");
    }

    /// An unknown priority string orders exactly like cost.
    #[test]
    fn test_unknown_priority_matches_cost() {
        let providers = vec![
            ProviderRecord {
                name: "Slow".to_string(),
                fixed_fee_min_usd: Decimal::ONE,
                speed_min_hours: Decimal::ONE_HUNDRED,
                speed_max_hours: Decimal::ONE_HUNDRED,
                ..ProviderRecord::default()
            },
            ProviderRecord {
                name: "Fast".to_string(),
                fixed_fee_min_usd: Decimal::TEN,
                ..ProviderRecord::default()
            },
        ];
        let rank = |priority| {
            RankingEngine::recommend(
                &providers,
                &request(Decimal::ONE_HUNDRED, priority),
                &table(Decimal::ONE),
                &UsdNormalization::Native,
            )
            .unwrap()
        };

        let fastest = rank(Priority::parse_lenient("fastest"));
        let cost = rank(Priority::Cost);
        assert_eq!(fastest.providers, cost.providers);
        assert_eq!(fastest.best.provider, "Slow");
        assert_eq!(rank(Priority::Speed).best.provider, "Fast");
    }
}
