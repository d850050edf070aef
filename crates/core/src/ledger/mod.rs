//! Trip ledger.
//!
//! This module implements balance aggregation:
//! - Ledger accounts (participants and external payers)
//! - Paid/owed balances and net positions
//! - The ledger builder

pub mod balance;
pub mod service;

#[cfg(test)]
mod service_props;

pub use balance::{Balance, Ledger, LedgerAccount};
pub use service::{LedgerService, build_ledger};
