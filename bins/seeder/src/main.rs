//! Provider table seeder for Sendwise development and testing.
//!
//! Writes the reference table of 20 transfer providers, with every column the
//! loader understands plus descriptive ones it ignores.
//!
//! Usage: cargo run --bin seeder [PATH]
//!
//! The path defaults to `SENDWISE__PROVIDERS__PATH`, then `data/payment.csv`.

use std::fs;
use std::path::Path;

use anyhow::Context;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use sendwise_shared::ProvidersConfig;

/// One row of the reference table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ReferenceProvider {
    provider: &'static str,
    #[serde(rename = "Service_Type")]
    service_type: &'static str,
    #[serde(rename = "Fee_Structure")]
    fee_structure: &'static str,
    #[serde(rename = "Fixed_Fee_Min_USD")]
    fixed_fee_min_usd: Decimal,
    #[serde(rename = "Fixed_Fee_Max_USD")]
    fixed_fee_max_usd: Decimal,
    #[serde(rename = "Percentage_Fee_Min")]
    percentage_fee_min: Decimal,
    #[serde(rename = "Percentage_Fee_Max")]
    percentage_fee_max: Decimal,
    #[serde(rename = "Speed_Min_Hours")]
    speed_min_hours: Decimal,
    #[serde(rename = "Speed_Max_Hours")]
    speed_max_hours: Decimal,
    #[serde(rename = "Coverage_Countries")]
    coverage_countries: u32,
    #[serde(rename = "Exchange_Rate_Markup_Min")]
    exchange_rate_markup_min: Decimal,
    #[serde(rename = "Exchange_Rate_Markup_Max")]
    exchange_rate_markup_max: Decimal,
    source: &'static str,
    notes: &'static str,
}

const REFERENCE_PROVIDERS: &[ReferenceProvider] = &[
    ReferenceProvider {
        provider: "Wise",
        service_type: "Digital Money Transfer",
        fee_structure: "Fixed + Percentage",
        fixed_fee_min_usd: dec!(0.50),
        fixed_fee_max_usd: dec!(2.00),
        percentage_fee_min: dec!(0.41),
        percentage_fee_max: dec!(0.62),
        speed_min_hours: dec!(0.25),
        speed_max_hours: dec!(24),
        coverage_countries: 80,
        exchange_rate_markup_min: dec!(0.00),
        exchange_rate_markup_max: dec!(0.00),
        source: "Wise Transparency",
        notes: "Mid-market rate used",
    },
    ReferenceProvider {
        provider: "Western Union",
        service_type: "Traditional + Digital",
        fee_structure: "Variable by corridor",
        fixed_fee_min_usd: dec!(5.00),
        fixed_fee_max_usd: dec!(15.00),
        percentage_fee_min: dec!(1.00),
        percentage_fee_max: dec!(5.00),
        speed_min_hours: dec!(0.25),
        speed_max_hours: dec!(168),
        coverage_countries: 200,
        exchange_rate_markup_min: dec!(2.00),
        exchange_rate_markup_max: dec!(4.00),
        source: "World Bank RPW",
        notes: "Extensive agent network",
    },
    ReferenceProvider {
        provider: "MoneyGram",
        service_type: "Traditional + Digital",
        fee_structure: "Variable by corridor",
        fixed_fee_min_usd: dec!(4.00),
        fixed_fee_max_usd: dec!(12.00),
        percentage_fee_min: dec!(1.00),
        percentage_fee_max: dec!(4.50),
        speed_min_hours: dec!(0.50),
        speed_max_hours: dec!(72),
        coverage_countries: 200,
        exchange_rate_markup_min: dec!(2.00),
        exchange_rate_markup_max: dec!(3.50),
        source: "World Bank RPW",
        notes: "Domestic limit 10000 USD",
    },
    ReferenceProvider {
        provider: "Swift",
        service_type: "Bank Wire Network",
        fee_structure: "Fixed + Correspondent",
        fixed_fee_min_usd: dec!(15.00),
        fixed_fee_max_usd: dec!(50.00),
        percentage_fee_min: dec!(0.05),
        percentage_fee_max: dec!(0.25),
        speed_min_hours: dec!(24.00),
        speed_max_hours: dec!(72),
        coverage_countries: 999,
        exchange_rate_markup_min: dec!(0.00),
        exchange_rate_markup_max: dec!(0.00),
        source: "Banking Industry",
        notes: "Interbank network protocol",
    },
    ReferenceProvider {
        provider: "Remitly",
        service_type: "Digital Money Transfer",
        fee_structure: "Tiered Service",
        fixed_fee_min_usd: dec!(0.00),
        fixed_fee_max_usd: dec!(8.00),
        percentage_fee_min: dec!(0.50),
        percentage_fee_max: dec!(2.50),
        speed_min_hours: dec!(0.25),
        speed_max_hours: dec!(72),
        coverage_countries: 50,
        exchange_rate_markup_min: dec!(1.00),
        exchange_rate_markup_max: dec!(3.00),
        source: "Remitly Transparency",
        notes: "Express vs Economy options",
    },
    ReferenceProvider {
        provider: "Xoom",
        service_type: "Digital Money Transfer",
        fee_structure: "Variable by corridor",
        fixed_fee_min_usd: dec!(0.00),
        fixed_fee_max_usd: dec!(4.99),
        percentage_fee_min: dec!(1.00),
        percentage_fee_max: dec!(3.00),
        speed_min_hours: dec!(0.25),
        speed_max_hours: dec!(24),
        coverage_countries: 160,
        exchange_rate_markup_min: dec!(1.00),
        exchange_rate_markup_max: dec!(2.50),
        source: "PayPal Xoom",
        notes: "PayPal integration available",
    },
    ReferenceProvider {
        provider: "WorldRemit",
        service_type: "Digital Money Transfer",
        fee_structure: "Fixed Fee Model",
        fixed_fee_min_usd: dec!(2.99),
        fixed_fee_max_usd: dec!(9.99),
        percentage_fee_min: dec!(0.00),
        percentage_fee_max: dec!(1.00),
        speed_min_hours: dec!(0.25),
        speed_max_hours: dec!(48),
        coverage_countries: 130,
        exchange_rate_markup_min: dec!(1.00),
        exchange_rate_markup_max: dec!(2.00),
        source: "WorldRemit Public",
        notes: "Mobile-focused platform",
    },
    ReferenceProvider {
        provider: "Ria Money Transfer",
        service_type: "Traditional + Digital",
        fee_structure: "Variable by corridor",
        fixed_fee_min_usd: dec!(3.00),
        fixed_fee_max_usd: dec!(15.00),
        percentage_fee_min: dec!(1.00),
        percentage_fee_max: dec!(4.00),
        speed_min_hours: dec!(1.00),
        speed_max_hours: dec!(72),
        coverage_countries: 190,
        exchange_rate_markup_min: dec!(2.00),
        exchange_rate_markup_max: dec!(4.00),
        source: "Ria Public",
        notes: "Walmart partnership active",
    },
    ReferenceProvider {
        provider: "Transfer Galaxy",
        service_type: "Digital Money Transfer",
        fee_structure: "Percentage Based",
        fixed_fee_min_usd: dec!(0.00),
        fixed_fee_max_usd: dec!(0.00),
        percentage_fee_min: dec!(0.80),
        percentage_fee_max: dec!(1.50),
        speed_min_hours: dec!(24.00),
        speed_max_hours: dec!(48),
        coverage_countries: 30,
        exchange_rate_markup_min: dec!(0.50),
        exchange_rate_markup_max: dec!(1.00),
        source: "Transfer Galaxy",
        notes: "European market focus",
    },
    ReferenceProvider {
        provider: "OFX",
        service_type: "Digital Money Transfer",
        fee_structure: "Exchange Rate Markup",
        fixed_fee_min_usd: dec!(0.00),
        fixed_fee_max_usd: dec!(0.00),
        percentage_fee_min: dec!(0.00),
        percentage_fee_max: dec!(0.00),
        speed_min_hours: dec!(24.00),
        speed_max_hours: dec!(48),
        coverage_countries: 190,
        exchange_rate_markup_min: dec!(0.40),
        exchange_rate_markup_max: dec!(2.00),
        source: "OFX Transparency",
        notes: "No transfer fees charged",
    },
    ReferenceProvider {
        provider: "Paysend",
        service_type: "Digital Money Transfer",
        fee_structure: "Flat Fee",
        fixed_fee_min_usd: dec!(1.50),
        fixed_fee_max_usd: dec!(2.99),
        percentage_fee_min: dec!(0.00),
        percentage_fee_max: dec!(0.00),
        speed_min_hours: dec!(0.25),
        speed_max_hours: dec!(24),
        coverage_countries: 100,
        exchange_rate_markup_min: dec!(2.00),
        exchange_rate_markup_max: dec!(3.00),
        source: "Paysend Public",
        notes: "Card-to-card transfers",
    },
    ReferenceProvider {
        provider: "Azimo",
        service_type: "Digital Money Transfer",
        fee_structure: "Variable by corridor",
        fixed_fee_min_usd: dec!(0.00),
        fixed_fee_max_usd: dec!(4.99),
        percentage_fee_min: dec!(0.50),
        percentage_fee_max: dec!(2.00),
        speed_min_hours: dec!(0.25),
        speed_max_hours: dec!(48),
        coverage_countries: 200,
        exchange_rate_markup_min: dec!(1.00),
        exchange_rate_markup_max: dec!(2.50),
        source: "Azimo Public",
        notes: "Mobile-first approach",
    },
    ReferenceProvider {
        provider: "Skrill",
        service_type: "Digital Wallet",
        fee_structure: "Percentage + Fixed",
        fixed_fee_min_usd: dec!(1.45),
        fixed_fee_max_usd: dec!(1.45),
        percentage_fee_min: dec!(1.45),
        percentage_fee_max: dec!(1.45),
        speed_min_hours: dec!(0.25),
        speed_max_hours: dec!(24),
        coverage_countries: 40,
        exchange_rate_markup_min: dec!(3.99),
        exchange_rate_markup_max: dec!(3.99),
        source: "Skrill Fees",
        notes: "Digital wallet service",
    },
    ReferenceProvider {
        provider: "Payoneer",
        service_type: "B2B Payment Platform",
        fee_structure: "Volume Based",
        fixed_fee_min_usd: dec!(1.50),
        fixed_fee_max_usd: dec!(3.00),
        percentage_fee_min: dec!(0.50),
        percentage_fee_max: dec!(2.00),
        speed_min_hours: dec!(24.00),
        speed_max_hours: dec!(72),
        coverage_countries: 200,
        exchange_rate_markup_min: dec!(1.00),
        exchange_rate_markup_max: dec!(3.00),
        source: "Payoneer Public",
        notes: "Business-focused platform",
    },
    ReferenceProvider {
        provider: "TransferGo",
        service_type: "Digital Money Transfer",
        fee_structure: "Fixed Fee",
        fixed_fee_min_usd: dec!(0.99),
        fixed_fee_max_usd: dec!(4.99),
        percentage_fee_min: dec!(0.00),
        percentage_fee_max: dec!(0.00),
        speed_min_hours: dec!(0.25),
        speed_max_hours: dec!(48),
        coverage_countries: 47,
        exchange_rate_markup_min: dec!(0.60),
        exchange_rate_markup_max: dec!(2.00),
        source: "TransferGo Public",
        notes: "European corridor specialist",
    },
    ReferenceProvider {
        provider: "Currencies Direct",
        service_type: "FX Specialist",
        fee_structure: "Negotiable",
        fixed_fee_min_usd: dec!(0.00),
        fixed_fee_max_usd: dec!(0.00),
        percentage_fee_min: dec!(0.00),
        percentage_fee_max: dec!(0.00),
        speed_min_hours: dec!(24.00),
        speed_max_hours: dec!(48),
        coverage_countries: 40,
        exchange_rate_markup_min: dec!(0.50),
        exchange_rate_markup_max: dec!(2.50),
        source: "Currencies Direct",
        notes: "Large transfer specialist",
    },
    ReferenceProvider {
        provider: "Global Reach",
        service_type: "Digital Money Transfer",
        fee_structure: "Variable",
        fixed_fee_min_usd: dec!(2.00),
        fixed_fee_max_usd: dec!(8.00),
        percentage_fee_min: dec!(0.50),
        percentage_fee_max: dec!(1.50),
        speed_min_hours: dec!(1.00),
        speed_max_hours: dec!(48),
        coverage_countries: 40,
        exchange_rate_markup_min: dec!(1.00),
        exchange_rate_markup_max: dec!(2.00),
        source: "Global Reach",
        notes: "Cash pickup network",
    },
    ReferenceProvider {
        provider: "InstaReM",
        service_type: "Digital Money Transfer",
        fee_structure: "Mid-market focused",
        fixed_fee_min_usd: dec!(0.00),
        fixed_fee_max_usd: dec!(15.00),
        percentage_fee_min: dec!(0.25),
        percentage_fee_max: dec!(1.00),
        speed_min_hours: dec!(1.00),
        speed_max_hours: dec!(48),
        coverage_countries: 55,
        exchange_rate_markup_min: dec!(0.25),
        exchange_rate_markup_max: dec!(1.00),
        source: "InstaReM Public",
        notes: "Business and consumer",
    },
    ReferenceProvider {
        provider: "Pangea",
        service_type: "Digital Money Transfer",
        fee_structure: "Flat Fee",
        fixed_fee_min_usd: dec!(4.99),
        fixed_fee_max_usd: dec!(4.99),
        percentage_fee_min: dec!(0.00),
        percentage_fee_max: dec!(0.00),
        speed_min_hours: dec!(24.00),
        speed_max_hours: dec!(72),
        coverage_countries: 21,
        exchange_rate_markup_min: dec!(1.50),
        exchange_rate_markup_max: dec!(2.50),
        source: "Pangea Public",
        notes: "Latin America specialist",
    },
    ReferenceProvider {
        provider: "Sharemoney",
        service_type: "Digital Money Transfer",
        fee_structure: "Fixed Fee",
        fixed_fee_min_usd: dec!(3.99),
        fixed_fee_max_usd: dec!(4.99),
        percentage_fee_min: dec!(0.00),
        percentage_fee_max: dec!(0.00),
        speed_min_hours: dec!(0.25),
        speed_max_hours: dec!(72),
        coverage_countries: 90,
        exchange_rate_markup_min: dec!(2.00),
        exchange_rate_markup_max: dec!(4.00),
        source: "Sharemoney Public",
        notes: "Cash pickup available",
    },
];

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SENDWISE__PROVIDERS__PATH").ok())
        .unwrap_or_else(|| ProvidersConfig::default().path);

    println!("Writing provider table to {path}...");
    write_table(Path::new(&path))?;
    println!("Seeded {} providers.", REFERENCE_PROVIDERS.len());

    Ok(())
}

/// Writes the reference table, creating parent directories as needed.
fn write_table(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    for provider in REFERENCE_PROVIDERS {
        writer.serialize(provider)?;
    }
    writer.flush()?;

    Ok(())
}
