//! Settlement domain types.

use tripsplit_shared::types::Money;
use tripsplit_shared::{ExternalPayerPolicy, SettlementConfig};

use crate::ledger::{Ledger, LedgerAccount};
use crate::split::SplitPolicy;

/// A directed transfer: `from` owes `to` the `amount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debt {
    /// Account that pays.
    pub from: LedgerAccount,
    /// Account that receives.
    pub to: LedgerAccount,
    /// Transfer amount, strictly positive.
    pub amount: Money,
}

/// Thresholds for the debt simplifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettlementOptions {
    /// Nets with magnitude at or below this are treated as settled.
    pub settled_threshold: Money,
    /// Accepted imbalance per ledger account before settlement is refused.
    pub imbalance_tolerance_per_account: Money,
}

impl From<&SettlementConfig> for SettlementOptions {
    fn from(config: &SettlementConfig) -> Self {
        Self {
            settled_threshold: config.settled_threshold,
            imbalance_tolerance_per_account: config.imbalance_tolerance_per_account,
        }
    }
}

/// Every knob of the settlement pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettlementSettings {
    /// Split validation tolerances.
    pub splits: SplitPolicy,
    /// Treatment of non-participant payers.
    pub external_payers: ExternalPayerPolicy,
    /// Debt simplifier thresholds.
    pub options: SettlementOptions,
}

impl From<&SettlementConfig> for SettlementSettings {
    fn from(config: &SettlementConfig) -> Self {
        Self {
            splits: SplitPolicy::from(config),
            external_payers: config.external_payer_policy,
            options: SettlementOptions::from(config),
        }
    }
}

/// Result of settling a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSettlement {
    /// Balances per account.
    pub ledger: Ledger,
    /// Transfers that settle the ledger.
    pub debts: Vec<Debt>,
}
