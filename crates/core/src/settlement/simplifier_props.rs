//! Property-based tests for debt simplification.

use std::collections::BTreeMap;

use proptest::prelude::*;
use tripsplit_shared::types::Money;

use super::simplifier::{apply_debts, simplify_debts};
use super::types::SettlementOptions;
use crate::ledger::{Balance, Ledger, LedgerAccount};
use crate::test_utils::pid;

/// Zero-sum ledger: the last account absorbs the sum of the others.
fn zero_sum_ledger() -> impl Strategy<Value = Ledger> {
    (
        prop::collection::vec(-1_000_000i64..1_000_000, 1..12),
        any::<bool>(),
    )
        .prop_map(|(mut nets, external_last)| {
            let rest: i64 = nets.iter().sum();
            nets.push(-rest);
            let last = nets.len() - 1;

            nets.into_iter()
                .zip(1u128..)
                .enumerate()
                .map(|(i, (net, n))| {
                    let account = if external_last && i == last {
                        LedgerAccount::External("Hotel".into())
                    } else {
                        LedgerAccount::Participant(pid(n))
                    };
                    let mut balance = Balance::default();
                    if net >= 0 {
                        balance.add_paid(Money::from_minor(net));
                    } else {
                        balance.add_owed(Money::from_minor(-net));
                    }
                    (account, balance)
                })
                .collect()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Paying every debt brings every account to zero.
    #[test]
    fn prop_debts_settle_every_account(ledger in zero_sum_ledger()) {
        let debts = simplify_debts(&ledger, &SettlementOptions::default()).unwrap();
        let after = apply_debts(&ledger, &debts);
        prop_assert!(after.values().all(|net| net.is_zero()));
    }

    /// Greedy matching needs at most one debt fewer than there are accounts.
    #[test]
    fn prop_debt_count_is_bounded(ledger in zero_sum_ledger()) {
        let debts = simplify_debts(&ledger, &SettlementOptions::default()).unwrap();
        prop_assert!(debts.len() < ledger.len());
        prop_assert!(debts.iter().all(|d| d.amount.is_positive() && d.from != d.to));
    }

    /// Per-account debt totals reconstruct the ledger nets.
    #[test]
    fn prop_debts_reconstruct_nets(ledger in zero_sum_ledger()) {
        let debts = simplify_debts(&ledger, &SettlementOptions::default()).unwrap();

        let mut flows: BTreeMap<LedgerAccount, Money> = BTreeMap::new();
        for debt in &debts {
            *flows.entry(debt.to.clone()).or_default() += debt.amount;
            *flows.entry(debt.from.clone()).or_default() -= debt.amount;
        }
        for (account, net) in ledger.nets() {
            prop_assert_eq!(flows.get(&account).copied().unwrap_or_default(), net);
        }
    }

    /// Identical ledgers always produce identical debts.
    #[test]
    fn prop_simplification_is_deterministic(ledger in zero_sum_ledger()) {
        let mut rows: Vec<_> = ledger.iter().map(|(a, b)| (a.clone(), *b)).collect();
        rows.reverse();
        let rebuilt: Ledger = rows.into_iter().collect();
        let first = simplify_debts(&ledger, &SettlementOptions::default()).unwrap();
        let second = simplify_debts(&rebuilt, &SettlementOptions::default()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Any non-zero imbalance is rejected when no tolerance is configured.
    #[test]
    fn prop_imbalance_is_rejected(ledger in zero_sum_ledger(), skew in 1i64..10_000) {
        let mut skewed = ledger;
        skewed.account_mut(LedgerAccount::Participant(pid(1))).add_paid(Money::from_minor(skew));
        prop_assert!(simplify_debts(&skewed, &SettlementOptions::default()).is_err());
    }
}
