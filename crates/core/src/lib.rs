//! Core business logic for Sendwise.
//!
//! This crate contains pure business logic with ZERO web or file dependencies.
//! Given a provider table, a transfer request and a USD rate table, it scores
//! every provider, ranks them by the requested priority and summarizes the
//! savings of the winner over the worst option.
//!
//! # Modules
//!
//! - `currency` - USD rate tables, cross rates and the rate source port
//! - `ranking` - Cost model, ranking engine and savings summary
//! - `service` - Async orchestration against a rate source

pub mod currency;
pub mod error;
pub mod ranking;
pub mod service;

pub use error::RecommendError;
pub use service::RecommendationService;
