//! Recommendation error types.

use sendwise_shared::AppError;
use thiserror::Error;

/// Errors that can stop a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// The request itself is malformed (e.g. identical currencies).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No usable exchange rate for the pair.
    #[error("Could not get exchange rate from {from} to {to}: {reason}")]
    RateUnavailable {
        /// Source currency code.
        from: String,
        /// Destination currency code.
        to: String,
        /// What went wrong.
        reason: String,
    },

    /// The provider table produced no scores.
    #[error("No provider found for the given currencies")]
    NoProviders,
}

impl RecommendError {
    /// Builds a `RateUnavailable` error for a currency pair.
    pub fn rate_unavailable(from: &str, to: &str, reason: impl Into<String>) -> Self {
        Self::RateUnavailable {
            from: from.to_string(),
            to: to.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<RecommendError> for AppError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::InvalidRequest(msg) => Self::Validation(msg),
            RecommendError::RateUnavailable { .. } => Self::RateUnavailable(err.to_string()),
            RecommendError::NoProviders => Self::NotFound(err.to_string()),
        }
    }
}
