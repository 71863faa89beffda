//! Shared errors and configuration for Sendwise.
//!
//! This crate provides the pieces every other crate agrees on:
//! - Application-wide error type with HTTP status mapping
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{
    AppConfig, CorsConfig, LogFormat, LoggingConfig, ProvidersConfig, RatesConfig, ServerConfig,
};
pub use error::AppError;
