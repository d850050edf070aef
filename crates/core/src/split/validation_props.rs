//! Property-based tests for split validation.

use proptest::prelude::*;
use tripsplit_shared::types::Money;

use super::error::SplitError;
use super::types::{SplitInput, SplitPolicy, SplitType};
use super::validation::SplitService;
use crate::test_utils::{pid, roster};

/// Strategy to generate a valid positive amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Money> {
    (1i64..100_000_000i64).prop_map(Money::from_minor)
}

/// Strategy for a participant count on a trip.
fn participant_count() -> impl Strategy<Value = u128> {
    1u128..=12
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Equal shares add up to the amount exactly and differ by at most one cent.
    #[test]
    fn prop_equal_shares_sum_exactly(
        amount in positive_amount(),
        count in participant_count(),
    ) {
        let trip = roster(count);
        let inputs: Vec<SplitInput> = (1..=count).map(|n| SplitInput::equal(pid(n))).collect();

        let resolved = SplitService::validate(
            amount,
            SplitType::Equal,
            &inputs,
            &trip,
            &SplitPolicy::default(),
        )
        .unwrap();

        prop_assert_eq!(resolved.len(), inputs.len());
        prop_assert_eq!(resolved.iter().map(|s| s.amount).sum::<Money>(), amount);

        let max = resolved.iter().map(|s| s.amount).max().unwrap();
        let min = resolved.iter().map(|s| s.amount).min().unwrap();
        prop_assert!(max - min <= Money::MINOR_UNIT);
        // Leftover cents go to leading entries, so shares never increase.
        prop_assert!(resolved.windows(2).all(|w| w[0].amount >= w[1].amount));
    }

    /// Manual shares inside the tolerance always resolve to an exact total.
    #[test]
    fn prop_manual_within_tolerance_resolves_exactly(
        shares in prop::collection::vec(100i64..1_000_000, 1..8),
        drift in -1i64..=1,
    ) {
        let count = u128::try_from(shares.len()).unwrap();
        let trip = roster(count);
        let inputs: Vec<SplitInput> = shares
            .iter()
            .zip(1u128..)
            .map(|(minor, n)| SplitInput::manual(pid(n), Money::from_minor(*minor)))
            .collect();
        let amount = Money::from_minor(shares.iter().sum::<i64>() + drift);

        let resolved = SplitService::validate(
            amount,
            SplitType::Manual,
            &inputs,
            &trip,
            &SplitPolicy::default(),
        )
        .unwrap();

        prop_assert_eq!(resolved.iter().map(|s| s.amount).sum::<Money>(), amount);
        prop_assert!(resolved.iter().all(|s| s.amount.is_positive()));
    }

    /// Manual shares outside the tolerance are rejected with the stated total.
    #[test]
    fn prop_manual_outside_tolerance_rejected(
        shares in prop::collection::vec(10_000i64..1_000_000, 1..8),
        gap in 2i64..10_000,
        over in any::<bool>(),
    ) {
        let count = u128::try_from(shares.len()).unwrap();
        let trip = roster(count);
        let inputs: Vec<SplitInput> = shares
            .iter()
            .zip(1u128..)
            .map(|(minor, n)| SplitInput::manual(pid(n), Money::from_minor(*minor)))
            .collect();
        let total = shares.iter().sum::<i64>();
        let amount = Money::from_minor(if over { total + gap } else { total - gap });

        let result = SplitService::validate(
            amount,
            SplitType::Manual,
            &inputs,
            &trip,
            &SplitPolicy::default(),
        );

        prop_assert_eq!(
            result,
            Err(SplitError::AmountMismatch {
                expected: amount,
                actual: Money::from_minor(total),
            })
        );
    }
}
