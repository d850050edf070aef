//! Property-based tests for ledger aggregation.

use proptest::prelude::*;
use tripsplit_shared::ExternalPayerPolicy;
use tripsplit_shared::types::Money;

use super::service::LedgerService;
use crate::split::{SplitInput, SplitPolicy, SplitService, SplitType};
use crate::test_utils::{divided, indivisible, pid, roster};
use crate::trip::{Expense, Payer};

/// Raw expense: (amount, payer index with 0 = external, divisible, equal, participation mask).
type RawExpense = (i64, u128, bool, bool, Vec<bool>);

fn raw_expense(participants: u128) -> impl Strategy<Value = RawExpense> {
    let mask_len = usize::try_from(participants).unwrap();
    (
        1i64..5_000_000,
        0..=participants,
        any::<bool>(),
        any::<bool>(),
        prop::collection::vec(any::<bool>(), mask_len),
    )
}

/// Turns a raw expense into a validated expense record.
fn materialise(index: u128, participants: u128, raw: &RawExpense) -> Expense {
    let (minor, payer_index, divisible, equal, mask) = raw;
    let amount = Money::from_minor(*minor);
    let payer = if *payer_index == 0 {
        Payer::external(if index % 2 == 0 { "Hotel" } else { "Airline" })
    } else {
        Payer::Participant(pid(*payer_index))
    };

    if !divisible {
        return indivisible(index, amount, payer);
    }

    let mut members: Vec<u128> = (1..=participants)
        .zip(mask)
        .filter_map(|(n, on)| on.then_some(n))
        .collect();
    if members.is_empty() {
        members.push(1);
    }

    let inputs: Vec<SplitInput> = members.iter().map(|n| SplitInput::equal(pid(*n))).collect();
    let resolved = SplitService::validate(
        amount,
        SplitType::Equal,
        &inputs,
        &roster(participants),
        &SplitPolicy::default(),
    )
    .unwrap();

    let split_type = if *equal { SplitType::Equal } else { SplitType::Manual };
    divided(index, amount, payer, split_type, resolved)
}

fn trip_strategy() -> impl Strategy<Value = (u128, Vec<Expense>)> {
    (2u128..=6).prop_flat_map(|participants| {
        prop::collection::vec(raw_expense(participants), 0..25).prop_map(move |raws| {
            let expenses = raws
                .iter()
                .zip(1u128..)
                .map(|(raw, index)| materialise(index, participants, raw))
                .collect();
            (participants, expenses)
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Nets of a ledger built from validated expenses sum to exactly zero.
    #[test]
    fn prop_ledger_is_zero_sum(
        (participants, expenses) in trip_strategy(),
        exclude in any::<bool>(),
    ) {
        let policy = if exclude {
            ExternalPayerPolicy::Exclude
        } else {
            ExternalPayerPolicy::VirtualAccount
        };
        let ledger = LedgerService::build(&roster(participants), &expenses, policy);

        prop_assert_eq!(ledger.total_net(), Money::ZERO);
        for n in 1..=participants {
            prop_assert!(ledger.participant(pid(n)).is_some());
        }
    }

    /// Shuffling the expense list yields the identical ledger.
    #[test]
    fn prop_ledger_is_order_independent(
        (participants, expenses, shuffled) in trip_strategy().prop_flat_map(|(participants, expenses)| {
            (Just(participants), Just(expenses.clone()), Just(expenses).prop_shuffle())
        }),
    ) {
        let trip = roster(participants);
        let original = LedgerService::build(&trip, &expenses, ExternalPayerPolicy::VirtualAccount);
        let reordered = LedgerService::build(&trip, &shuffled, ExternalPayerPolicy::VirtualAccount);

        prop_assert_eq!(original, reordered);
    }

    /// Total paid equals the amounts of every expense that entered the ledger.
    #[test]
    fn prop_paid_matches_posted_expenses((participants, expenses) in trip_strategy()) {
        let ledger = LedgerService::build(
            &roster(participants),
            &expenses,
            ExternalPayerPolicy::VirtualAccount,
        );

        let posted: Money = expenses
            .iter()
            .filter(|e| e.is_divisible() || e.payer.participant_id().is_some())
            .map(|e| e.amount)
            .sum();
        let paid: Money = ledger.iter().map(|(_, balance)| balance.paid).sum();
        prop_assert_eq!(paid, posted);
    }
}
