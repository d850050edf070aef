//! Split domain types.

use serde::{Deserialize, Serialize};
use tripsplit_shared::SettlementConfig;
use tripsplit_shared::types::{Money, ParticipantId};

/// How a divisible expense is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplitType {
    /// Every enabled participant pays the same share.
    Equal,
    /// The caller states each participant's share.
    Manual,
}

impl SplitType {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "EQUAL",
            Self::Manual => "MANUAL",
        }
    }
}

/// A candidate split entry as entered by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitInput {
    /// Participant the share belongs to.
    pub participant_id: ParticipantId,
    /// Stated share; required for manual splits, ignored for equal splits.
    #[serde(default)]
    pub amount: Option<Money>,
    /// Whether the participant takes part in this expense.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl SplitInput {
    /// Enabled entry for an equal split.
    #[must_use]
    pub const fn equal(participant_id: ParticipantId) -> Self {
        Self {
            participant_id,
            amount: None,
            enabled: true,
        }
    }

    /// Enabled entry for a manual split.
    #[must_use]
    pub const fn manual(participant_id: ParticipantId, amount: Money) -> Self {
        Self {
            participant_id,
            amount: Some(amount),
            enabled: true,
        }
    }

    /// Returns the same entry with `enabled` cleared.
    #[must_use]
    pub const fn disabled(self) -> Self {
        Self {
            enabled: false,
            ..self
        }
    }
}

/// A resolved share of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    /// Participant who owes the share.
    pub participant_id: ParticipantId,
    /// Share amount.
    pub amount: Money,
}

impl Split {
    /// Creates a split.
    #[must_use]
    pub const fn new(participant_id: ParticipantId, amount: Money) -> Self {
        Self {
            participant_id,
            amount,
        }
    }
}

/// Tolerances applied while validating splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPolicy {
    /// Largest accepted gap between a manual total and the expense amount.
    pub manual_tolerance: Money,
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            manual_tolerance: Money::MINOR_UNIT,
        }
    }
}

impl From<&SettlementConfig> for SplitPolicy {
    fn from(config: &SettlementConfig) -> Self {
        Self {
            manual_tolerance: config.manual_split_tolerance,
        }
    }
}
