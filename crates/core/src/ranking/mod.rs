//! Provider scoring, ranking and savings summary.

pub mod cost;
pub mod engine;
pub mod summary;
pub mod types;

#[cfg(test)]
mod tests;

pub use cost::{CostModel, ProviderScore};
pub use engine::RankingEngine;
pub use summary::SummaryBuilder;
pub use types::{
    Priority, ProviderRecord, RecommendationResult, ScoredProvider, Summary, TransferRequest,
    UsdNormalization,
};
