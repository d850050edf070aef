//! Split validation and share resolution.
//!
//! Validation is pure: it never touches a ledger. On success it returns the
//! resolved shares, which always sum to the expense amount exactly.

use std::collections::BTreeSet;

use tracing::debug;
use tripsplit_shared::types::Money;

use super::allocation::AllocationUtil;
use super::error::SplitError;
use super::types::{Split, SplitInput, SplitPolicy, SplitType};
use crate::trip::Roster;

/// Validates a split with the default policy (0.01 manual tolerance).
///
/// # Errors
///
/// Returns `SplitError` if any split invariant is violated.
pub fn validate_split(
    amount: Money,
    splits: &[SplitInput],
    split_type: SplitType,
    roster: &Roster,
) -> Result<Vec<Split>, SplitError> {
    SplitService::validate(amount, split_type, splits, roster, &SplitPolicy::default())
}

/// Split service for validating and resolving expense shares.
pub struct SplitService;

impl SplitService {
    /// Validate candidate splits and resolve the final shares.
    ///
    /// Checks run in this order:
    /// 1. Expense amount is positive and at most `Money::MAX_AMOUNT`
    /// 2. Split set is not empty
    /// 3. Every participant is on the roster, at most once
    /// 4. At least one entry is enabled
    /// 5. Equal: shares are computed, caller amounts ignored
    /// 6. Manual: every enabled share is present and positive, and the total
    ///    is within `policy.manual_tolerance` of the amount
    ///
    /// A manual residual inside the tolerance is absorbed by the largest
    /// share (earliest entry on ties). Disabled entries produce no share.
    ///
    /// # Errors
    ///
    /// Returns the first `SplitError` encountered.
    pub fn validate(
        amount: Money,
        split_type: SplitType,
        splits: &[SplitInput],
        roster: &Roster,
        policy: &SplitPolicy,
    ) -> Result<Vec<Split>, SplitError> {
        if !amount.is_positive() {
            return Err(SplitError::NonPositiveAmount(amount));
        }
        if !amount.is_within_limit() {
            return Err(SplitError::AmountOutOfRange {
                limit: Money::MAX_AMOUNT,
            });
        }
        if splits.is_empty() {
            return Err(SplitError::EmptySplitSet);
        }

        let mut seen = BTreeSet::new();
        for entry in splits {
            if !roster.contains(entry.participant_id) {
                return Err(SplitError::UnknownParticipant(entry.participant_id));
            }
            if !seen.insert(entry.participant_id) {
                return Err(SplitError::DuplicateParticipant(entry.participant_id));
            }
        }

        let enabled: Vec<&SplitInput> = splits.iter().filter(|entry| entry.enabled).collect();
        if enabled.is_empty() {
            return Err(SplitError::NoEnabledParticipants);
        }

        match split_type {
            SplitType::Equal => Ok(Self::resolve_equal(amount, &enabled)),
            SplitType::Manual => Self::resolve_manual(amount, &enabled, policy),
        }
    }

    fn resolve_equal(amount: Money, enabled: &[&SplitInput]) -> Vec<Split> {
        AllocationUtil::allocate_equal(amount, enabled.len())
            .into_iter()
            .zip(enabled)
            .map(|(share, entry)| Split::new(entry.participant_id, share))
            .collect()
    }

    fn resolve_manual(
        amount: Money,
        enabled: &[&SplitInput],
        policy: &SplitPolicy,
    ) -> Result<Vec<Split>, SplitError> {
        let mut resolved = Vec::with_capacity(enabled.len());
        for entry in enabled {
            let share = entry
                .amount
                .ok_or(SplitError::MissingSplitAmount(entry.participant_id))?;
            if !share.is_positive() {
                return Err(SplitError::NonPositiveSplit {
                    participant_id: entry.participant_id,
                    amount: share,
                });
            }
            resolved.push(Split::new(entry.participant_id, share));
        }

        let actual = Money::checked_sum(resolved.iter().map(|split| split.amount)).ok_or(
            SplitError::AmountOutOfRange {
                limit: Money::MAX_AMOUNT,
            },
        )?;
        let residual = amount - actual;
        if residual.abs() > policy.manual_tolerance {
            return Err(SplitError::AmountMismatch {
                expected: amount,
                actual,
            });
        }

        if !residual.is_zero() {
            let index = Self::largest_share(&resolved);
            let adjusted = resolved[index].amount + residual;
            if !adjusted.is_positive() {
                return Err(SplitError::NonPositiveSplit {
                    participant_id: resolved[index].participant_id,
                    amount: adjusted,
                });
            }
            debug!(
                participant_id = %resolved[index].participant_id,
                residual = %residual,
                "Absorbed manual split residual"
            );
            resolved[index].amount = adjusted;
        }

        Ok(resolved)
    }

    /// Index of the largest share; the earliest one wins ties.
    fn largest_share(splits: &[Split]) -> usize {
        splits
            .iter()
            .enumerate()
            .fold(0, |best, (i, split)| {
                if split.amount > splits[best].amount {
                    i
                } else {
                    best
                }
            })
    }
}
