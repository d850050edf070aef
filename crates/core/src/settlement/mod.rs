//! Debt settlement.
//!
//! - `simplifier` - Greedy debt simplification over ledger nets
//! - `service` - Validates a trip snapshot and settles it end to end

pub mod error;
pub mod service;
pub mod simplifier;
pub mod types;

#[cfg(test)]
mod simplifier_props;

pub use error::{ConsistencyError, SettlementError};
pub use service::SettlementService;
pub use simplifier::{apply_debts, simplify_debts};
pub use types::{Debt, SettlementOptions, SettlementSettings, TripSettlement};
