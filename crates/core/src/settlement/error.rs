//! Settlement error types.
//!
//! `ConsistencyError` means upstream data is wrong (a validator was bypassed
//! or balances were tampered with); it aborts the computation. The umbrella
//! `SettlementError` adds the user-facing snapshot validation failures.

use thiserror::Error;
use tripsplit_shared::types::{Currency, ExpenseId, Money, ParticipantId, TripId};

use crate::split::SplitError;

/// Internal-consistency faults detected by the debt simplifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    /// Ledger nets do not sum to zero.
    #[error("Ledger is unbalanced by {imbalance} (tolerance {tolerance})")]
    UnbalancedLedger {
        /// Sum of all nets.
        imbalance: Money,
        /// Largest accepted absolute sum.
        tolerance: Money,
    },
}

/// Errors that can occur while settling a trip snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    // ========== Validation Errors ==========
    /// An expense's split is invalid.
    #[error("Invalid split for expense {expense_id}: {source}")]
    InvalidSplit {
        /// Offending expense.
        expense_id: ExpenseId,
        /// Underlying validation failure.
        #[source]
        source: SplitError,
    },

    /// An indivisible expense has a non-positive amount.
    #[error("Expense {expense_id} must have a positive amount, got {amount}")]
    NonPositiveExpense {
        /// Offending expense.
        expense_id: ExpenseId,
        /// Stated amount.
        amount: Money,
    },

    /// An expense is not in the trip currency.
    #[error("Expense {expense_id} is in {actual}, trip currency is {expected}")]
    CurrencyMismatch {
        /// Offending expense.
        expense_id: ExpenseId,
        /// Trip currency.
        expected: Currency,
        /// Expense currency.
        actual: Currency,
    },

    /// An expense belongs to another trip.
    #[error("Expense {expense_id} belongs to trip {actual}, not {expected}")]
    TripMismatch {
        /// Offending expense.
        expense_id: ExpenseId,
        /// Trip being settled.
        expected: TripId,
        /// Trip on the expense.
        actual: TripId,
    },

    /// The roster lists a participant twice.
    #[error("Participant {0} is listed more than once")]
    DuplicateParticipant(ParticipantId),

    /// An expense is paid by someone outside the roster.
    #[error("Expense {expense_id} is paid by unknown participant {participant_id}")]
    UnknownPayer {
        /// Offending expense.
        expense_id: ExpenseId,
        /// Payer ID.
        participant_id: ParticipantId,
    },

    /// An external payer has an empty name.
    #[error("Expense {0} has an external payer without a name")]
    BlankExternalPayer(ExpenseId),

    /// The trip's expenses add up to more than the supported maximum.
    #[error("Trip expenses exceed the maximum total of {limit}")]
    TotalOutOfRange {
        /// Largest accepted trip total.
        limit: Money,
    },

    // ========== Consistency Errors ==========
    /// The ledger failed an internal-consistency check.
    #[error(transparent)]
    Inconsistent(#[from] ConsistencyError),
}

impl SettlementError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSplit { source, .. } => source.error_code(),
            Self::NonPositiveExpense { .. } => "NON_POSITIVE_AMOUNT",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::TripMismatch { .. } => "TRIP_MISMATCH",
            Self::DuplicateParticipant(_) => "DUPLICATE_PARTICIPANT",
            Self::UnknownPayer { .. } => "UNKNOWN_PAYER",
            Self::BlankExternalPayer(_) => "BLANK_EXTERNAL_PAYER",
            Self::TotalOutOfRange { .. } => "AMOUNT_OUT_OF_RANGE",
            Self::Inconsistent(ConsistencyError::UnbalancedLedger { .. }) => "UNBALANCED_LEDGER",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::InvalidSplit { .. }
            | Self::NonPositiveExpense { .. }
            | Self::CurrencyMismatch { .. }
            | Self::TripMismatch { .. }
            | Self::DuplicateParticipant(_)
            | Self::UnknownPayer { .. }
            | Self::BlankExternalPayer(_)
            | Self::TotalOutOfRange { .. } => 400,

            // 500 Internal Server Error
            Self::Inconsistent(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expense_id, pid};

    fn unbalanced() -> SettlementError {
        ConsistencyError::UnbalancedLedger {
            imbalance: Money::from_major(5),
            tolerance: Money::ZERO,
        }
        .into()
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(unbalanced().error_code(), "UNBALANCED_LEDGER");
        assert_eq!(
            SettlementError::InvalidSplit {
                expense_id: expense_id(1),
                source: SplitError::EmptySplitSet,
            }
            .error_code(),
            "EMPTY_SPLIT_SET"
        );
        assert_eq!(
            SettlementError::DuplicateParticipant(pid(1)).error_code(),
            "DUPLICATE_PARTICIPANT"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(unbalanced().http_status_code(), 500);
        assert_eq!(
            SettlementError::BlankExternalPayer(expense_id(1)).http_status_code(),
            400
        );
        assert_eq!(
            SettlementError::CurrencyMismatch {
                expense_id: expense_id(1),
                expected: Currency::Usd,
                actual: Currency::Eur,
            }
            .http_status_code(),
            400
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            unbalanced().to_string(),
            "Ledger is unbalanced by 5.00 (tolerance 0.00)"
        );

        let err = SettlementError::CurrencyMismatch {
            expense_id: expense_id(2),
            expected: Currency::Usd,
            actual: Currency::Eur,
        };
        assert_eq!(
            err.to_string(),
            "Expense 00000000-0000-0000-0000-000000000002 is in EUR, trip currency is USD"
        );
    }

    #[test]
    fn test_total_out_of_range() {
        let err = SettlementError::TotalOutOfRange {
            limit: Money::MAX_AMOUNT,
        };
        assert_eq!(err.error_code(), "AMOUNT_OUT_OF_RANGE");
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(
            err.to_string(),
            "Trip expenses exceed the maximum total of 10000000000000.00"
        );
    }
}
