//! Provider table loading for Sendwise.
//!
//! Reads the provider CSV once at startup into an ordered list of
//! [`ProviderRecord`]s. Parsing is lenient: missing or unparseable numeric
//! cells become zero, negative numbers are clamped to zero, and rows without
//! a provider name are skipped. Every such correction is logged.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use sendwise_core::ranking::ProviderRecord;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while loading the provider table.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The file could not be opened.
    #[error("Failed to open provider table {path}: {source}")]
    Io {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The CSV structure is broken.
    #[error("Malformed provider table: {0}")]
    Csv(#[from] csv::Error),
}

/// One raw CSV row. Unknown columns are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderRow {
    #[serde(rename = "Provider")]
    provider: Option<String>,
    #[serde(rename = "Fixed_Fee_Min_USD")]
    fixed_fee_min: Option<String>,
    #[serde(rename = "Percentage_Fee_Min")]
    pct_min: Option<String>,
    #[serde(rename = "Percentage_Fee_Max")]
    pct_max: Option<String>,
    #[serde(rename = "Exchange_Rate_Markup_Min")]
    markup_min: Option<String>,
    #[serde(rename = "Speed_Min_Hours")]
    speed_min: Option<String>,
    #[serde(rename = "Speed_Max_Hours")]
    speed_max: Option<String>,
}

/// The process-wide provider table, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCatalog {
    providers: Vec<ProviderRecord>,
}

impl ProviderCatalog {
    /// Loads the table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the CSV is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            providers = catalog.len(),
            "Provider table loaded"
        );
        Ok(catalog)
    }

    /// Loads the table from any CSV reader with a header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV is malformed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut providers = Vec::new();
        let mut seen = HashSet::new();

        for (index, row) in csv_reader.deserialize::<ProviderRow>().enumerate() {
            let row = row?;
            let line = index + 2;

            let Some(name) = row.provider.as_deref().filter(|n| !n.is_empty()) else {
                warn!(line, "Skipping provider row without a name");
                continue;
            };
            if !seen.insert(name.to_string()) {
                warn!(line, provider = name, "Skipping duplicate provider row");
                continue;
            }

            providers.push(ProviderRecord {
                name: name.to_string(),
                fixed_fee_min_usd: parse_cell(
                    row.fixed_fee_min.as_deref(),
                    "Fixed_Fee_Min_USD",
                    name,
                ),
                percentage_fee_min: parse_cell(row.pct_min.as_deref(), "Percentage_Fee_Min", name),
                percentage_fee_max: parse_cell(row.pct_max.as_deref(), "Percentage_Fee_Max", name),
                exchange_rate_markup_min: parse_cell(
                    row.markup_min.as_deref(),
                    "Exchange_Rate_Markup_Min",
                    name,
                ),
                speed_min_hours: parse_cell(row.speed_min.as_deref(), "Speed_Min_Hours", name),
                speed_max_hours: parse_cell(row.speed_max.as_deref(), "Speed_Max_Hours", name),
            });
        }

        Ok(Self { providers })
    }

    /// Providers in file order.
    #[must_use]
    pub fn providers(&self) -> &[ProviderRecord] {
        &self.providers
    }

    /// Consumes the catalog, returning the providers in file order.
    #[must_use]
    pub fn into_providers(self) -> Vec<ProviderRecord> {
        self.providers
    }

    /// Number of providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no providers were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Parses a numeric cell. Blank, unparseable and negative values become zero.
fn parse_cell(raw: Option<&str>, column: &'static str, provider: &str) -> Decimal {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Decimal::ZERO;
    };

    let parsed = Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw));
    match parsed {
        Ok(value) if value.is_sign_negative() && !value.is_zero() => {
            warn!(provider, column, value = raw, "Negative value clamped to zero");
            Decimal::ZERO
        }
        Ok(value) => value,
        Err(_) => {
            warn!(provider, column, value = raw, "Unparseable value treated as zero");
            Decimal::ZERO
        }
    }
}
