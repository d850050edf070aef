//! Ledger Builder.
//!
//! Aggregates the expenses of a trip into per-account balances. The builder
//! trusts its input: splits are expected to be validated already, and any
//! inconsistency surfaces later as an unbalanced ledger.

use tracing::{debug, warn};
use tripsplit_shared::ExternalPayerPolicy;
use tripsplit_shared::types::ParticipantId;

use super::balance::{Ledger, LedgerAccount};
use crate::trip::{Division, Expense, Payer, Roster};

/// Builds a ledger with the default external-payer policy.
#[must_use]
pub fn build_ledger(roster: &Roster, expenses: &[Expense]) -> Ledger {
    LedgerService::build(roster, expenses, ExternalPayerPolicy::default())
}

/// Ledger service for balance aggregation.
pub struct LedgerService;

impl LedgerService {
    /// Aggregate all expenses into a ledger.
    ///
    /// 1. Every roster participant starts at zero, active or not
    /// 2. A divisible expense credits the payer's `paid` with the full amount
    ///    and charges each split share to that participant's `owed`
    /// 3. An indivisible expense is the payer's personal spend: it shows in
    ///    `paid` and leaves `net` unchanged
    /// 4. External payers follow `external_payers`: a virtual account that is
    ///    owed the shares, or exclusion of the expense. Indivisible expenses
    ///    paid externally have no effect on the ledger.
    ///
    /// Posting is additive, so the result does not depend on expense order.
    #[must_use]
    pub fn build(
        roster: &Roster,
        expenses: &[Expense],
        external_payers: ExternalPayerPolicy,
    ) -> Ledger {
        let mut ledger = Ledger::new();
        for id in roster.ids() {
            ledger.open(id.into());
        }

        let mut skipped = 0usize;
        for expense in expenses {
            if !Self::post(&mut ledger, roster, expense, external_payers) {
                skipped += 1;
            }
        }

        debug!(
            participants = roster.len(),
            expenses = expenses.len(),
            skipped,
            accounts = ledger.len(),
            "Built trip ledger"
        );

        ledger
    }

    /// Posts one expense. Returns false if it was left out of the ledger.
    fn post(
        ledger: &mut Ledger,
        roster: &Roster,
        expense: &Expense,
        external_payers: ExternalPayerPolicy,
    ) -> bool {
        match (&expense.payer, &expense.division) {
            (Payer::ExternalParty { .. }, _) if external_payers == ExternalPayerPolicy::Exclude => {
                false
            }
            (Payer::ExternalParty { .. }, Division::Indivisible) => false,
            (Payer::Participant(id), Division::Indivisible) => {
                Self::check_member(roster, expense, *id);
                ledger.account_mut((*id).into()).add_personal(expense.amount);
                true
            }
            (payer, Division::Divided { splits, .. }) => {
                ledger
                    .account_mut(Self::payer_account(roster, expense, payer))
                    .add_paid(expense.amount);

                for split in splits {
                    Self::check_member(roster, expense, split.participant_id);
                    ledger
                        .account_mut(split.participant_id.into())
                        .add_owed(split.amount);
                }
                true
            }
        }
    }

    fn payer_account(roster: &Roster, expense: &Expense, payer: &Payer) -> LedgerAccount {
        match payer {
            Payer::Participant(id) => {
                Self::check_member(roster, expense, *id);
                LedgerAccount::Participant(*id)
            }
            Payer::ExternalParty { name, .. } => LedgerAccount::External(name.trim().to_string()),
        }
    }

    fn check_member(roster: &Roster, expense: &Expense, id: ParticipantId) {
        if !roster.contains(id) {
            warn!(
                expense_id = %expense.id,
                participant_id = %id,
                "Expense references a participant outside the roster"
            );
        }
    }
}
