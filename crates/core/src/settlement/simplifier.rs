//! Debt Simplifier.
//!
//! Greedy matching of the largest debtor against the largest creditor. This
//! is not a minimum-transfer solver, but it emits at most `accounts - 1`
//! debts and its output depends only on the ledger contents.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use tracing::{debug, error};
use tripsplit_shared::types::Money;

use super::error::ConsistencyError;
use super::types::{Debt, SettlementOptions};
use crate::ledger::{Ledger, LedgerAccount};

/// An unsettled position waiting in one side of the queue.
///
/// Heap order: larger amount first, then smaller account.
#[derive(Debug, PartialEq, Eq)]
struct Outstanding {
    amount: Money,
    account: LedgerAccount,
}

impl Ord for Outstanding {
    fn cmp(&self, other: &Self) -> Ordering {
        self.amount
            .cmp(&other.amount)
            .then_with(|| other.account.cmp(&self.account))
    }
}

impl PartialOrd for Outstanding {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Converts ledger nets into a list of directed debts.
///
/// # Errors
///
/// Returns `ConsistencyError::UnbalancedLedger` if the nets do not sum to
/// zero within `imbalance_tolerance_per_account` times the account count.
pub fn simplify_debts(
    ledger: &Ledger,
    options: &SettlementOptions,
) -> Result<Vec<Debt>, ConsistencyError> {
    check_balanced(ledger, options)?;

    let threshold = options.settled_threshold;
    let mut creditors = BinaryHeap::new();
    let mut debtors = BinaryHeap::new();

    for (account, balance) in ledger.iter() {
        let net = balance.net();
        if net > threshold {
            creditors.push(Outstanding {
                amount: net,
                account: account.clone(),
            });
        } else if -net > threshold {
            debtors.push(Outstanding {
                amount: -net,
                account: account.clone(),
            });
        }
    }

    let mut debts = Vec::new();
    loop {
        let (Some(mut debtor), Some(mut creditor)) = (debtors.pop(), creditors.pop()) else {
            break;
        };

        let amount = debtor.amount.min(creditor.amount);
        debts.push(Debt {
            from: debtor.account.clone(),
            to: creditor.account.clone(),
            amount,
        });

        debtor.amount -= amount;
        creditor.amount -= amount;
        if debtor.amount > threshold {
            debtors.push(debtor);
        }
        if creditor.amount > threshold {
            creditors.push(creditor);
        }
    }

    debug!(
        accounts = ledger.len(),
        debts = debts.len(),
        "Simplified trip debts"
    );

    Ok(debts)
}

fn check_balanced(ledger: &Ledger, options: &SettlementOptions) -> Result<(), ConsistencyError> {
    let imbalance = ledger.total_net();
    let accounts = i64::try_from(ledger.len()).unwrap_or(i64::MAX);
    let tolerance = options.imbalance_tolerance_per_account.times(accounts);

    if imbalance.abs() > tolerance {
        error!(
            %imbalance,
            %tolerance,
            accounts = ledger.len(),
            "Ledger nets do not sum to zero"
        );
        return Err(ConsistencyError::UnbalancedLedger {
            imbalance,
            tolerance,
        });
    }
    Ok(())
}

/// Net position of every account after the debts are paid.
///
/// A debtor paying `amount` raises its net by `amount`; the creditor's net
/// drops by the same amount.
#[must_use]
pub fn apply_debts(ledger: &Ledger, debts: &[Debt]) -> BTreeMap<LedgerAccount, Money> {
    let mut nets = ledger.nets();
    for debt in debts {
        *nets.entry(debt.from.clone()).or_default() += debt.amount;
        *nets.entry(debt.to.clone()).or_default() -= debt.amount;
    }
    nets
}
