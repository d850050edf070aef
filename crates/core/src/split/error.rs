//! Split validation errors.
//!
//! Every variant is a user-input problem: the expense is rejected and the
//! message tells the caller what to fix.

use thiserror::Error;
use tripsplit_shared::types::{Money, ParticipantId};

/// Errors raised while validating the split of a divisible expense.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// The expense amount is zero or negative.
    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(Money),

    /// An amount or split total exceeds the supported maximum.
    #[error("Amounts must not exceed {limit}")]
    AmountOutOfRange {
        /// Largest accepted amount.
        limit: Money,
    },

    /// A divisible expense arrived without split entries.
    #[error("A divisible expense needs at least one split entry")]
    EmptySplitSet,

    /// A split references someone outside the trip.
    #[error("Participant {0} is not a member of this trip")]
    UnknownParticipant(ParticipantId),

    /// The same participant appears twice.
    #[error("Participant {0} appears more than once in the split")]
    DuplicateParticipant(ParticipantId),

    /// Every split entry is disabled.
    #[error("At least one participant must take part in the split")]
    NoEnabledParticipants,

    /// A manual split entry has no amount.
    #[error("Manual split for participant {0} has no amount")]
    MissingSplitAmount(ParticipantId),

    /// A manual split entry is zero or negative.
    #[error("Split for participant {participant_id} must be positive, got {amount}")]
    NonPositiveSplit {
        /// Offending participant.
        participant_id: ParticipantId,
        /// Stated amount.
        amount: Money,
    },

    /// Manual shares do not add up to the expense amount.
    #[error("Split total {actual} does not match expense amount {expected}")]
    AmountMismatch {
        /// Expense amount.
        expected: Money,
        /// Sum of the stated shares.
        actual: Money,
    },
}

impl SplitError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::AmountOutOfRange { .. } => "AMOUNT_OUT_OF_RANGE",
            Self::EmptySplitSet => "EMPTY_SPLIT_SET",
            Self::UnknownParticipant(_) => "UNKNOWN_PARTICIPANT",
            Self::DuplicateParticipant(_) => "DUPLICATE_PARTICIPANT",
            Self::NoEnabledParticipants => "NO_ENABLED_PARTICIPANTS",
            Self::MissingSplitAmount(_) => "MISSING_SPLIT_AMOUNT",
            Self::NonPositiveSplit { .. } => "NON_POSITIVE_SPLIT",
            Self::AmountMismatch { .. } => "AMOUNT_MISMATCH",
        }
    }
}
