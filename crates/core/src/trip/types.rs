//! Trip roster and expense records consumed by the settlement pipeline.
//!
//! These records arrive from the surrounding CRUD layer. They are plain data;
//! validation happens in `split` and `settlement::service`.

use std::collections::BTreeMap;

use tripsplit_shared::types::{Currency, ExpenseId, Money, ParticipantId, TripId, UserId};

use crate::split::{Split, SplitInput, SplitType};

/// A member of a trip. Participants are the unit of account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Participant ID, unique within the trip.
    pub id: ParticipantId,
    /// Name shown in balances and debt rows.
    pub display_name: String,
    /// Linked user account; `None` for guests.
    pub user_id: Option<UserId>,
}

impl Participant {
    /// Creates a participant linked to a registered user.
    #[must_use]
    pub fn member(id: ParticipantId, display_name: impl Into<String>, user_id: UserId) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            user_id: Some(user_id),
        }
    }

    /// Creates a guest participant with no linked user.
    #[must_use]
    pub fn guest(id: ParticipantId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            user_id: None,
        }
    }

    /// Returns true if the participant has no linked user.
    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.user_id.is_none()
    }
}

/// The set of participants of one trip, keyed by ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    participants: BTreeMap<ParticipantId, Participant>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a participant. Returns false if the ID was already present,
    /// in which case the roster is left unchanged.
    pub fn insert(&mut self, participant: Participant) -> bool {
        if self.participants.contains_key(&participant.id) {
            return false;
        }
        self.participants.insert(participant.id, participant);
        true
    }

    /// Returns true if the participant belongs to the trip.
    #[must_use]
    pub fn contains(&self, id: ParticipantId) -> bool {
        self.participants.contains_key(&id)
    }

    /// Looks up a participant.
    #[must_use]
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(&id)
    }

    /// Participant IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.participants.keys().copied()
    }

    /// Participants in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    /// Number of participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Returns true if the roster has no participants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

impl FromIterator<Participant> for Roster {
    fn from_iter<I: IntoIterator<Item = Participant>>(iter: I) -> Self {
        let mut roster = Self::new();
        for participant in iter {
            roster.insert(participant);
        }
        roster
    }
}

/// Who paid for an expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payer {
    /// A trip participant.
    Participant(ParticipantId),
    /// Someone outside the trip (a hotel, a friend who is not travelling).
    ExternalParty {
        /// Free-text name.
        name: String,
        /// Optional contact email.
        email: Option<String>,
    },
}

impl Payer {
    /// Creates an external-party payer without an email.
    #[must_use]
    pub fn external(name: impl Into<String>) -> Self {
        Self::ExternalParty {
            name: name.into(),
            email: None,
        }
    }

    /// Returns the participant ID if the payer is a participant.
    #[must_use]
    pub const fn participant_id(&self) -> Option<ParticipantId> {
        match self {
            Self::Participant(id) => Some(*id),
            Self::ExternalParty { .. } => None,
        }
    }
}

/// How an expense's cost is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Division {
    /// The payer covers the whole cost personally.
    Indivisible,
    /// The cost is split among participants.
    Divided {
        /// Split policy.
        split_type: SplitType,
        /// Shares in insertion order.
        splits: Vec<Split>,
    },
}

/// One expense of a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Owning trip.
    pub trip_id: TripId,
    /// Total amount, strictly positive.
    pub amount: Money,
    /// Currency the amount is expressed in.
    pub currency: Currency,
    /// Who paid.
    pub payer: Payer,
    /// How the cost is shared.
    pub division: Division,
}

impl Expense {
    /// Returns true if the expense is split among participants.
    #[must_use]
    pub fn is_divisible(&self) -> bool {
        matches!(self.division, Division::Divided { .. })
    }

    /// Resolved shares of a divisible expense; empty otherwise.
    #[must_use]
    pub fn splits(&self) -> &[Split] {
        match &self.division {
            Division::Indivisible => &[],
            Division::Divided { splits, .. } => splits,
        }
    }

    /// Re-expresses the stored shares as validator input.
    ///
    /// Equal splits drop their stored amounts so that shares are recomputed
    /// with the canonical remainder rule.
    #[must_use]
    pub fn split_inputs(&self) -> Option<(SplitType, Vec<SplitInput>)> {
        match &self.division {
            Division::Indivisible => None,
            Division::Divided { split_type, splits } => {
                let inputs = splits
                    .iter()
                    .map(|split| match split_type {
                        SplitType::Equal => SplitInput::equal(split.participant_id),
                        SplitType::Manual => SplitInput::manual(split.participant_id, split.amount),
                    })
                    .collect();
                Some((*split_type, inputs))
            }
        }
    }
}

/// Everything needed to settle one trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSnapshot {
    /// Trip ID.
    pub trip_id: TripId,
    /// Trip currency; every expense must use it.
    pub currency: Currency,
    /// Trip participants, in the order the caller listed them.
    pub participants: Vec<Participant>,
    /// Trip expenses.
    pub expenses: Vec<Expense>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expense_id, pid, trip_id};

    #[test]
    fn test_guest_has_no_user() {
        let guest = Participant::guest(pid(1), "Ana");
        assert!(guest.is_guest());

        let member = Participant::member(pid(2), "Ben", UserId::new());
        assert!(!member.is_guest());
    }

    #[test]
    fn test_roster_rejects_duplicate_ids() {
        let mut roster = Roster::new();
        assert!(roster.insert(Participant::guest(pid(1), "Ana")));
        assert!(!roster.insert(Participant::guest(pid(1), "Imposter")));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get(pid(1)).unwrap().display_name, "Ana");
    }

    #[test]
    fn test_roster_ids_are_sorted() {
        let roster: Roster = [
            Participant::guest(pid(3), "C"),
            Participant::guest(pid(1), "A"),
            Participant::guest(pid(2), "B"),
        ]
        .into_iter()
        .collect();
        assert_eq!(roster.ids().collect::<Vec<_>>(), vec![pid(1), pid(2), pid(3)]);
        assert!(roster.contains(pid(2)));
        assert!(!roster.contains(pid(4)));
    }

    #[test]
    fn test_payer_participant_id() {
        assert_eq!(Payer::Participant(pid(1)).participant_id(), Some(pid(1)));
        assert_eq!(Payer::external("Hotel").participant_id(), None);
    }

    #[test]
    fn test_equal_split_inputs_drop_amounts() {
        let expense = Expense {
            id: expense_id(1),
            trip_id: trip_id(1),
            amount: Money::from_major(100),
            currency: Currency::Usd,
            payer: Payer::Participant(pid(1)),
            division: Division::Divided {
                split_type: SplitType::Equal,
                splits: vec![
                    Split::new(pid(1), Money::from_minor(3_333)),
                    Split::new(pid(2), Money::from_minor(6_667)),
                ],
            },
        };

        let (split_type, inputs) = expense.split_inputs().unwrap();
        assert_eq!(split_type, SplitType::Equal);
        assert!(inputs.iter().all(|input| input.amount.is_none()));
        assert!(expense.is_divisible());
        assert_eq!(expense.splits().len(), 2);
    }

    #[test]
    fn test_indivisible_has_no_splits() {
        let expense = Expense {
            id: expense_id(1),
            trip_id: trip_id(1),
            amount: Money::from_major(10),
            currency: Currency::Usd,
            payer: Payer::Participant(pid(1)),
            division: Division::Indivisible,
        };
        assert!(!expense.is_divisible());
        assert!(expense.splits().is_empty());
        assert!(expense.split_inputs().is_none());
    }
}
