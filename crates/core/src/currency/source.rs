//! Rate source port.
//!
//! The core never talks HTTP itself. It asks a [`RateSource`] for a USD
//! based table and decides what to do with the answer.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::rates::RateTable;

/// Failures reported by a rate source.
///
/// A currency missing from a successful response is not an error here; it
/// is simply absent from the returned table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateSourceError {
    /// The request did not complete in time.
    #[error("Rate source timed out after {0:?}")]
    Timeout(Duration),

    /// Connection or protocol failure.
    #[error("Rate source request failed: {0}")]
    Transport(String),

    /// The source answered with an error status.
    #[error("Rate source returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message reported by the source.
        message: String,
    },

    /// The body could not be decoded.
    #[error("Rate source response could not be decoded: {0}")]
    Decode(String),
}

impl RateSourceError {
    /// Whether another attempt could reasonably succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Transport(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Decode(_) => false,
        }
    }
}

/// Supplier of USD-based exchange rates.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Source name for logs.
    fn name(&self) -> &str;

    /// Latest rates against USD. An empty `symbols` slice asks for every
    /// currency the source knows.
    async fn latest(&self, symbols: &[String]) -> Result<RateTable, RateSourceError>;
}

/// In-memory rate source for tests.
#[cfg(any(test, feature = "test-utils"))]
pub struct StaticRateSource {
    table: RateTable,
    failure: Option<RateSourceError>,
    fail_on: Option<Vec<String>>,
    calls: std::sync::Mutex<Vec<Vec<String>>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl StaticRateSource {
    /// Serves `table`, filtered by the requested symbols.
    #[must_use]
    pub fn new(table: RateTable) -> Self {
        Self {
            table,
            failure: None,
            fail_on: None,
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Fails every request with `error`.
    #[must_use]
    pub fn failing(error: RateSourceError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new(RateTable::new())
        }
    }

    /// Fails only requests for exactly these symbols.
    #[must_use]
    pub fn failing_on(mut self, symbols: &[&str], error: RateSourceError) -> Self {
        self.fail_on = Some(symbols.iter().map(ToString::to_string).collect());
        self.failure = Some(error);
        self
    }

    /// Symbols of every request received so far.
    ///
    /// # Panics
    ///
    /// Panics if the call log mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("call log poisoned").clone()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RateSource for StaticRateSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn latest(&self, symbols: &[String]) -> Result<RateTable, RateSourceError> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push(symbols.to_vec());

        if let Some(error) = &self.failure {
            let applies = self
                .fail_on
                .as_ref()
                .is_none_or(|only| only.as_slice() == symbols);
            if applies {
                return Err(error.clone());
            }
        }

        Ok(self.table.clone().retain_symbols(symbols))
    }
}
