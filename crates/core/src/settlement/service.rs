//! Trip settlement facade.
//!
//! Validates a full trip snapshot, then runs the ledger builder and the debt
//! simplifier. Callers outside this crate should go through here rather than
//! feed unchecked expenses to `build_ledger`.

use tracing::debug;
use tripsplit_shared::types::Money;

use super::error::SettlementError;
use super::simplifier::simplify_debts;
use super::types::{SettlementSettings, TripSettlement};
use crate::ledger::{Ledger, LedgerService};
use crate::split::SplitService;
use crate::trip::{Division, Expense, Payer, Roster, TripSnapshot};

/// Settlement service for whole trips.
pub struct SettlementService;

impl SettlementService {
    /// Validate a snapshot and compute balances and debts.
    ///
    /// # Errors
    ///
    /// Returns a validation variant of `SettlementError` for bad input and
    /// `SettlementError::Inconsistent` if the resulting ledger is unbalanced.
    pub fn settle(
        snapshot: &TripSnapshot,
        settings: &SettlementSettings,
    ) -> Result<TripSettlement, SettlementError> {
        let ledger = Self::ledger(snapshot, settings)?;
        let debts = simplify_debts(&ledger, &settings.options)?;

        debug!(
            trip_id = %snapshot.trip_id,
            debts = debts.len(),
            "Settled trip"
        );

        Ok(TripSettlement { ledger, debts })
    }

    /// Validate a snapshot and compute balances only.
    ///
    /// # Errors
    ///
    /// Returns a validation variant of `SettlementError` for bad input.
    pub fn ledger(
        snapshot: &TripSnapshot,
        settings: &SettlementSettings,
    ) -> Result<Ledger, SettlementError> {
        let roster = Self::roster(snapshot)?;
        let expenses = snapshot
            .expenses
            .iter()
            .map(|expense| Self::validate_expense(snapshot, &roster, expense, settings))
            .collect::<Result<Vec<_>, _>>()?;

        // Bounded totals keep every ledger sum inside `i64`.
        if Money::checked_sum(expenses.iter().map(|expense| expense.amount)).is_none() {
            return Err(SettlementError::TotalOutOfRange {
                limit: Money::MAX_AMOUNT,
            });
        }

        Ok(LedgerService::build(
            &roster,
            &expenses,
            settings.external_payers,
        ))
    }

    fn roster(snapshot: &TripSnapshot) -> Result<Roster, SettlementError> {
        let mut roster = Roster::new();
        for participant in &snapshot.participants {
            if !roster.insert(participant.clone()) {
                return Err(SettlementError::DuplicateParticipant(participant.id));
            }
        }
        Ok(roster)
    }

    /// Checks one expense and returns it with its shares resolved.
    fn validate_expense(
        snapshot: &TripSnapshot,
        roster: &Roster,
        expense: &Expense,
        settings: &SettlementSettings,
    ) -> Result<Expense, SettlementError> {
        if expense.trip_id != snapshot.trip_id {
            return Err(SettlementError::TripMismatch {
                expense_id: expense.id,
                expected: snapshot.trip_id,
                actual: expense.trip_id,
            });
        }
        if expense.currency != snapshot.currency {
            return Err(SettlementError::CurrencyMismatch {
                expense_id: expense.id,
                expected: snapshot.currency,
                actual: expense.currency,
            });
        }

        match &expense.payer {
            Payer::Participant(id) if !roster.contains(*id) => {
                return Err(SettlementError::UnknownPayer {
                    expense_id: expense.id,
                    participant_id: *id,
                });
            }
            Payer::ExternalParty { name, .. } if name.trim().is_empty() => {
                return Err(SettlementError::BlankExternalPayer(expense.id));
            }
            _ => {}
        }

        let Some((split_type, inputs)) = expense.split_inputs() else {
            if !expense.amount.is_positive() {
                return Err(SettlementError::NonPositiveExpense {
                    expense_id: expense.id,
                    amount: expense.amount,
                });
            }
            if !expense.amount.is_within_limit() {
                return Err(SettlementError::TotalOutOfRange {
                    limit: Money::MAX_AMOUNT,
                });
            }
            return Ok(expense.clone());
        };

        let splits = SplitService::validate(
            expense.amount,
            split_type,
            &inputs,
            roster,
            &settings.splits,
        )
        .map_err(|source| SettlementError::InvalidSplit {
            expense_id: expense.id,
            source,
        })?;

        Ok(Expense {
            division: Division::Divided { split_type, splits },
            ..expense.clone()
        })
    }
}
