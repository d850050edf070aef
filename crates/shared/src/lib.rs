//! Shared types, errors, and configuration for Tripsplit.
//!
//! This crate provides common types used across all other crates:
//! - Fixed-point money and currency codes
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ExternalPayerPolicy, SettlementConfig};
pub use error::AppError;
