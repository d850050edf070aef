//! Core settlement logic for Tripsplit.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `trip` - Participants, payers, and expense records
//! - `split` - Split validation and share allocation
//! - `ledger` - Per-participant paid/owed aggregation
//! - `settlement` - Debt simplification and the trip settlement facade

pub mod ledger;
pub mod settlement;
pub mod split;
pub mod trip;

#[cfg(test)]
mod test_utils;
