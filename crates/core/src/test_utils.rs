//! Deterministic fixtures shared by unit and property tests.

use tripsplit_shared::types::{Currency, ExpenseId, Money, ParticipantId, TripId};
use uuid::Uuid;

use crate::split::{Split, SplitType};
use crate::trip::{Division, Expense, Participant, Payer, Roster};

/// Participant ID whose ordering follows `n`.
pub fn pid(n: u128) -> ParticipantId {
    ParticipantId::from_uuid(Uuid::from_u128(n))
}

/// Trip ID built from `n`.
pub fn trip_id(n: u128) -> TripId {
    TripId::from_uuid(Uuid::from_u128(n))
}

/// Expense ID built from `n`.
pub fn expense_id(n: u128) -> ExpenseId {
    ExpenseId::from_uuid(Uuid::from_u128(n))
}

/// Roster of guests `P1..=Pn`.
pub fn roster(n: u128) -> Roster {
    (1..=n)
        .map(|i| Participant::guest(pid(i), format!("P{i}")))
        .collect()
}

/// Divisible expense in USD on trip 1.
pub fn divided(
    id: u128,
    amount: Money,
    payer: Payer,
    split_type: SplitType,
    splits: Vec<Split>,
) -> Expense {
    Expense {
        id: expense_id(id),
        trip_id: trip_id(1),
        amount,
        currency: Currency::Usd,
        payer,
        division: Division::Divided { split_type, splits },
    }
}

/// Indivisible expense in USD on trip 1.
pub fn indivisible(id: u128, amount: Money, payer: Payer) -> Expense {
    Expense {
        id: expense_id(id),
        trip_id: trip_id(1),
        amount,
        currency: Currency::Usd,
        payer,
        division: Division::Indivisible,
    }
}
